//! Programs that must stop with exactly one fatal error.

mod common;

use common::fail;
use tessel_interpreter::{Error, ResolveError, RuntimeError};
use tessel_syntax::{Diagnostic, Keyword, ParserError, Spanned};

#[test]
fn test_unbalanced_parentheses() {
    let (err, _) = fail("(defun (main) (print 1)))");
    assert!(matches!(err, Error::Syntax(ParserError::UnmatchedClose { .. })));

    let (err, _) = fail("(defun (main)\n  (print 1)");
    assert!(matches!(err, Error::Syntax(ParserError::UnclosedOpen { .. })));
}

#[test]
fn test_structure_errors() {
    let (err, _) = fail("(defun (helper) (return))");
    assert!(matches!(err, Error::Resolve(ResolveError::MissingMain { .. })));

    let (err, _) = fail("(defun (main) (return))\n(defun (main) (return))");
    assert!(matches!(err, Error::Resolve(ResolveError::DuplicateMain { .. })));
    assert_eq!(err.span().start_line, 2);
}

#[test]
fn test_output_before_failure_is_kept() {
    let (err, out) = fail("(defun (main) (print \"partial\") (print (+ 1 2 3)))");
    assert_eq!(out, "partial");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::Arity {
            keyword: Keyword::Add,
            found: 3,
            ..
        })
    ));
}

#[test]
fn test_control_flow_shapes() {
    let (err, _) = fail("(defun (main) (while))");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::Malformed { keyword: Keyword::While, .. })
    ));

    let (err, _) = fail("(defun (main) (for x))");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::Malformed { keyword: Keyword::For, .. })
    ));

    let (err, _) = fail("(defun (main) (for 1 (list) (print 1)))");
    assert!(matches!(err, Error::Runtime(RuntimeError::ExpectedVariable { .. })));
}

#[test]
fn test_main_argument_count() {
    let (err, _) = fail("(defun (main argv) (print argv))");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ArgumentCount {
            expected: 1,
            found: 0,
            ..
        })
    ));
}

#[test]
fn test_diagnostic_line() {
    let (err, _) = fail("(defun (main)\n  (print (- 1 2 3)))");
    let diagnostic = Diagnostic::from_error(&err);
    assert_eq!(
        diagnostic.to_string(),
        "error: '-' takes 1 or 2 operand(s), 3 given at 2:10"
    );
}
