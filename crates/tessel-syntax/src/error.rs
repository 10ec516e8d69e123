//! Error types for the lexer and parser.
//!
//! Lexer errors are never fatal: a string literal that runs off the end of the
//! input simply ends the token stream. The parser hands the condition back
//! next to the tree so callers can warn about it. Parser errors are fatal.

use crate::span::{Span, Spanned};
use std::fmt;

/// Conditions noticed while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// A `"` literal with no closing quote.
    ///
    /// ```text
    /// (print "hello
    ///        ^
    /// ```
    UnterminatedString {
        /// Location of the opening quote
        start: Span,
    },

    /// A `\` as the very last character inside a string literal.
    TrailingEscape {
        /// Location of the opening quote
        start: Span,
    },
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString { .. } => {
                write!(f, "unterminated string literal, input truncated")
            }
            Self::TrailingEscape { .. } => {
                write!(f, "escape at end of input, input truncated")
            }
        }
    }
}

impl Spanned for LexerError {
    fn span(&self) -> Span {
        match self {
            Self::UnterminatedString { start } | Self::TrailingEscape { start } => *start,
        }
    }
}

impl std::error::Error for LexerError {}

/// Source text that cannot be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The source bytes are not UTF-8.
    InvalidUtf8 {
        /// Location of the first offending byte
        span: Span,
    },

    /// A `)` with no open form to close.
    ///
    /// ```text
    /// (print 1))
    ///          ^
    /// ```
    UnmatchedClose {
        /// Location of the stray `)`
        span: Span,
    },

    /// Input ended while a form was still open.
    UnclosedOpen {
        /// Location of the innermost unclosed `(`
        span: Span,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 { .. } => write!(f, "source is not valid UTF-8"),
            Self::UnmatchedClose { .. } => write!(f, "unmatched ')'"),
            Self::UnclosedOpen { .. } => write!(f, "unclosed '(' at end of input"),
        }
    }
}

impl Spanned for ParserError {
    fn span(&self) -> Span {
        match self {
            Self::InvalidUtf8 { span } | Self::UnmatchedClose { span } | Self::UnclosedOpen { span } => {
                *span
            }
        }
    }
}

impl std::error::Error for ParserError {}

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParserError>;
