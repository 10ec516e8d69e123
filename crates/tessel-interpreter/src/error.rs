//! Error types for resolution and execution.
//!
//! Everything here is fatal: the driver reports the error and stops. Operand
//! type mismatches are *not* errors; builtins answer them with an absent
//! value instead.

use std::fmt;
use tessel_syntax::{Keyword, ParserError, Span, Spanned};

/// Problems with the top-level function structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// `(defun)` with nothing after the keyword.
    MalformedDefun {
        /// The whole form
        span: Span,
    },

    /// The second element of a `defun` is not a `(name params...)` form.
    ExpectedPrototype {
        /// The offending node
        span: Span,
    },

    /// The prototype does not start with an identifier.
    ExpectedFunctionName {
        /// The prototype form
        span: Span,
    },

    /// A prototype parameter is not an identifier.
    ExpectedParameter {
        /// The offending node
        span: Span,
    },

    /// A parameter has the same name as a function.
    ParameterShadowsFunction {
        /// Parameter name
        name: String,
        /// The parameter leaf
        span: Span,
    },

    /// The same parameter name appears twice in one prototype.
    DuplicateParameter {
        /// Parameter name
        name: String,
        /// The second occurrence
        span: Span,
    },

    /// `main` is declared more than once.
    DuplicateMain {
        /// The second declaration's name
        span: Span,
    },

    /// A function name is declared more than once.
    DuplicateFunction {
        /// Function name
        name: String,
        /// The second declaration's name
        span: Span,
    },

    /// No `main` anywhere in the program.
    MissingMain {
        /// The whole program
        span: Span,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDefun { .. } => write!(f, "malformed defun"),
            Self::ExpectedPrototype { .. } => write!(f, "expected prototype"),
            Self::ExpectedFunctionName { .. } => write!(f, "expected function name"),
            Self::ExpectedParameter { .. } => write!(f, "expected parameter name"),
            Self::ParameterShadowsFunction { name, .. } => {
                write!(f, "parameter '{name}' shadows a function")
            }
            Self::DuplicateParameter { name, .. } => {
                write!(f, "duplicate parameter '{name}'")
            }
            Self::DuplicateMain { .. } => write!(f, "redeclaration of main function"),
            Self::DuplicateFunction { name, .. } => {
                write!(f, "redeclaration of function '{name}'")
            }
            Self::MissingMain { .. } => write!(f, "no main function declared"),
        }
    }
}

impl Spanned for ResolveError {
    fn span(&self) -> Span {
        match self {
            Self::MalformedDefun { span }
            | Self::ExpectedPrototype { span }
            | Self::ExpectedFunctionName { span }
            | Self::ExpectedParameter { span }
            | Self::ParameterShadowsFunction { span, .. }
            | Self::DuplicateParameter { span, .. }
            | Self::DuplicateMain { span }
            | Self::DuplicateFunction { span, .. }
            | Self::MissingMain { span } => *span,
        }
    }
}

impl std::error::Error for ResolveError {}

/// Fatal conditions met while executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A statement or builtin form with the wrong shape.
    Malformed {
        /// The form's keyword
        keyword: Keyword,
        /// The form
        span: Span,
    },

    /// A builtin called with the wrong number of operands.
    Arity {
        /// The builtin
        keyword: Keyword,
        /// Accepted operand counts, for the message
        expected: &'static str,
        /// Operands given
        found: usize,
        /// The form
        span: Span,
    },

    /// A value-less keyword used where a value is needed.
    NotAnExpression {
        /// The keyword
        keyword: Keyword,
        /// The form
        span: Span,
    },

    /// A keyword that cannot be executed for effect.
    NotAStatement {
        /// The keyword
        keyword: Keyword,
        /// The form
        span: Span,
    },

    /// A bare keyword where a value or statement was expected.
    KeywordInLeaf {
        /// The keyword
        keyword: Keyword,
        /// The leaf
        span: Span,
    },

    /// A bare literal or identifier in statement position.
    ExpectedStatement {
        /// The leaf
        span: Span,
    },

    /// `()` in expression position.
    EmptyForm {
        /// The form
        span: Span,
    },

    /// The head of a form is neither a keyword nor an identifier.
    NotCallable {
        /// The head node
        span: Span,
    },

    /// `set`/`for` target is not a variable.
    ExpectedVariable {
        /// The offending node
        span: Span,
    },

    /// A function name read as a variable.
    FunctionAsValue {
        /// Function name
        name: String,
        /// The leaf
        span: Span,
    },

    /// A variable name in call position.
    NotAFunction {
        /// Variable name
        name: String,
        /// The leaf
        span: Span,
    },

    /// An identifier the resolver never annotated.
    Unresolved {
        /// Identifier text
        name: String,
        /// The leaf
        span: Span,
    },

    /// A user function called with the wrong number of arguments.
    ArgumentCount {
        /// Function name
        name: String,
        /// Parameter count
        expected: usize,
        /// Arguments given
        found: usize,
        /// The call form
        span: Span,
    },

    /// Recursion went past the configured limit.
    CallDepthExceeded {
        /// The configured limit
        limit: usize,
        /// The call that crossed it
        span: Span,
    },

    /// Writing program output failed.
    Output {
        /// The I/O error message
        message: String,
        /// The `print` form
        span: Span,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { keyword, .. } => write!(f, "malformed {keyword}"),
            Self::Arity {
                keyword,
                expected,
                found,
                ..
            } => write!(
                f,
                "'{keyword}' takes {expected} operand(s), {found} given"
            ),
            Self::NotAnExpression { keyword, .. } => {
                write!(f, "'{keyword}' does not produce a value")
            }
            Self::NotAStatement { keyword, .. } => {
                write!(f, "'{keyword}' cannot be used as a statement")
            }
            Self::KeywordInLeaf { keyword, .. } => {
                write!(f, "unexpected keyword '{keyword}'")
            }
            Self::ExpectedStatement { .. } => write!(f, "expected statement"),
            Self::EmptyForm { .. } => write!(f, "empty form"),
            Self::NotCallable { .. } => write!(f, "expected keyword or function name"),
            Self::ExpectedVariable { .. } => write!(f, "expected variable"),
            Self::FunctionAsValue { name, .. } => {
                write!(f, "function '{name}' used as a value")
            }
            Self::NotAFunction { name, .. } => write!(f, "'{name}' is not a function"),
            Self::Unresolved { name, .. } => write!(f, "unresolved identifier '{name}'"),
            Self::ArgumentCount {
                name,
                expected,
                found,
                ..
            } => write!(
                f,
                "function '{name}' takes {expected} argument(s), {found} given"
            ),
            Self::CallDepthExceeded { limit, .. } => {
                write!(f, "call depth limit of {limit} exceeded")
            }
            Self::Output { message, .. } => write!(f, "output failed: {message}"),
        }
    }
}

impl Spanned for RuntimeError {
    fn span(&self) -> Span {
        match self {
            Self::Malformed { span, .. }
            | Self::Arity { span, .. }
            | Self::NotAnExpression { span, .. }
            | Self::NotAStatement { span, .. }
            | Self::KeywordInLeaf { span, .. }
            | Self::ExpectedStatement { span }
            | Self::EmptyForm { span }
            | Self::NotCallable { span }
            | Self::ExpectedVariable { span }
            | Self::FunctionAsValue { span, .. }
            | Self::NotAFunction { span, .. }
            | Self::Unresolved { span, .. }
            | Self::ArgumentCount { span, .. }
            | Self::CallDepthExceeded { span, .. }
            | Self::Output { span, .. } => *span,
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Any fatal error from source text to program exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unbalanced parentheses
    Syntax(ParserError),

    /// Bad function structure
    Resolve(ResolveError),

    /// Failure during execution
    Runtime(RuntimeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "{err}"),
            Self::Resolve(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "{err}"),
        }
    }
}

impl Spanned for Error {
    fn span(&self) -> Span {
        match self {
            Self::Syntax(err) => err.span(),
            Self::Resolve(err) => err.span(),
            Self::Runtime(err) => err.span(),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Resolve(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

impl From<ParserError> for Error {
    fn from(err: ParserError) -> Self {
        Self::Syntax(err)
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

/// Result type for execution.
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;

/// Result type for the whole pipeline.
pub type Result<T> = std::result::Result<T, Error>;
