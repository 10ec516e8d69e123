//! Lexical tokens.
//!
//! A token is a view into the source buffer plus a coarse kind. The lexer only
//! separates parentheses, string literals and "everything else"; deciding
//! whether an atom is a number, a keyword or a name happens when the tree
//! leaf is built (see [`crate::ast::LeafKind::classify`]).

use crate::span::{Span, Spanned};
use std::fmt;

/// Coarse token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,

    /// `)`
    RParen,

    /// A double-quoted literal, quotes included
    Str,

    /// A maximal run of non-delimiter characters
    Atom,

    /// End of input (also produced when a string literal runs off the end)
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Str => "string literal",
            Self::Atom => "atom",
            Self::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A borrowed slice of source text with its kind and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// Token category
    pub kind: TokenKind,

    /// Exact source text (empty for EOF)
    pub text: &'src str,

    /// Location in the source
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Creates a token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Creates the end-of-input token at `span`.
    #[must_use]
    pub const fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// Returns `true` for the end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Content equality: same text, regardless of where it came from.
    #[must_use]
    pub fn same_text(&self, other: &Token<'_>) -> bool {
        self.text == other.text
    }
}

impl Spanned for Token<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}", self.kind),
            _ => f.write_str(self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_token() {
        let eof = Token::eof(Span::point(4, 1, 5));
        assert!(eof.is_eof());
        assert_eq!(eof.text, "");
        assert_eq!(eof.to_string(), "end of input");
    }

    #[test]
    fn test_same_text_ignores_location() {
        let a = Token::new(TokenKind::Atom, "x", Span::new(0, 1, 1, 1, 1, 2));
        let b = Token::new(TokenKind::Atom, "x", Span::new(9, 10, 2, 3, 2, 4));
        assert!(a.same_text(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_display_is_source_text() {
        let tok = Token::new(TokenKind::Str, "\"hi\"", Span::default());
        assert_eq!(tok.to_string(), "\"hi\"");
    }
}
