//! Tree construction.
//!
//! The parser never recurses: it keeps an explicit stack of the branches that
//! are still open. `(` opens a new branch, `)` closes the innermost one and
//! attaches it to its parent, and anything else becomes a leaf of the
//! innermost open branch.
//!
//! # Examples
//!
//! ```
//! use tessel_syntax::parser::parse;
//!
//! let root = parse("(defun (main) (print 1))").unwrap();
//! let root = root.as_branch().unwrap();
//!
//! assert_eq!(root.children.len(), 1);
//! assert_eq!(root.nesting_depth(), 2);
//! ```

use crate::ast::{Branch, Leaf, Node};
use crate::error::{LexerError, ParserError, ParserResult};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::TokenKind;

/// A parsed tree, plus the reason the token stream stopped early if it did.
#[derive(Debug, Clone)]
pub struct Parsed<'src> {
    /// Root branch holding the top-level forms
    pub root: Node<'src>,

    /// Set when an unterminated string literal cut the input short
    pub truncation: Option<LexerError>,
}

/// Parser over a single source buffer.
pub struct Parser<'src> {
    /// Token source
    lexer: Lexer<'src>,

    /// Branches still waiting for their `)`: (children so far, span of `(`)
    open: Vec<(Vec<Node<'src>>, Span)>,
}

impl<'src> Parser<'src> {
    /// Creates a parser for `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            open: Vec::new(),
        }
    }

    /// Consumes all tokens and returns the root branch.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::UnmatchedClose`] for a `)` with nothing open,
    /// and [`ParserError::UnclosedOpen`] when input ends inside a form.
    pub fn parse(self) -> ParserResult<Node<'src>> {
        self.parse_full().map(|parsed| parsed.root)
    }

    /// Like [`Parser::parse`], but also reports a truncated token stream.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse`].
    pub fn parse_full(mut self) -> ParserResult<Parsed<'src>> {
        let source = self.lexer.source();
        let mut current: Vec<Node<'src>> = Vec::new();

        loop {
            let tok = self.lexer.next_token();
            match tok.kind {
                TokenKind::LParen => {
                    tessel_log::trace!("open form at {}", tok.span);
                    self.open.push((std::mem::take(&mut current), tok.span));
                }
                TokenKind::RParen => {
                    let Some((parent, open_span)) = self.open.pop() else {
                        return Err(ParserError::UnmatchedClose { span: tok.span });
                    };
                    let children = std::mem::replace(&mut current, parent);
                    let branch = Branch::new(children, Span::merge(open_span, tok.span));
                    current.push(Node::Branch(branch));
                }
                TokenKind::Str | TokenKind::Atom => {
                    current.push(Node::Leaf(Leaf::new(tok)));
                }
                TokenKind::Eof => {
                    if let Some((_, open_span)) = self.open.pop() {
                        return Err(ParserError::UnclosedOpen { span: open_span });
                    }
                    let whole = Span::merge(Span::point(0, 1, 1), tok.span);
                    tessel_log::debug!(
                        "parsed {} top-level forms from {} bytes",
                        current.len(),
                        source.len()
                    );
                    return Ok(Parsed {
                        root: Node::Branch(Branch::new(current, whole)),
                        truncation: self.lexer.truncation().cloned(),
                    });
                }
            }
        }
    }
}

/// Parses `source` into a root branch.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(source: &str) -> ParserResult<Node<'_>> {
    Parser::new(source).parse()
}

/// Turns raw source bytes into text.
///
/// # Errors
///
/// Returns [`ParserError::InvalidUtf8`] pointing at the first byte that is
/// not part of a UTF-8 sequence.
pub fn decode_source(bytes: Vec<u8>) -> ParserResult<String> {
    String::from_utf8(bytes).map_err(|err| {
        let valid = err.utf8_error().valid_up_to();
        let prefix = String::from_utf8_lossy(&err.as_bytes()[..valid]);
        let line = prefix.matches('\n').count() + 1;
        let last_line = prefix.rsplit('\n').next().unwrap_or_default();
        let column = last_line.chars().count() + 1;
        ParserError::InvalidUtf8 {
            span: Span::point(valid, line, column),
        }
    })
}

/// Parses `source`, keeping any truncation the lexer ran into.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse_full(source: &str) -> ParserResult<Parsed<'_>> {
    Parser::new(source).parse_full()
}
