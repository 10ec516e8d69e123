//! Tokenization.
//!
//! The lexer is lazy: [`Lexer::next_token`] scans exactly one token from the
//! current position. Only four things are recognised:
//!
//! - `(` and `)`, each a one-character token
//! - `"..."` string literals, where `\` escapes whatever follows it
//! - atoms: maximal runs of anything that is not whitespace, `"`, `;`, `(`, `)`
//! - end of input
//!
//! Whitespace is space, tab, newline and carriage return, so CRLF sources lex
//! like LF ones.
//!
//! Whitespace and `;` line comments between tokens are skipped. A string
//! literal that never closes ends the token stream; the lexer records that as
//! a [`LexerError`], readable through [`Lexer::truncation`], but does not fail.
//!
//! # Examples
//!
//! ```
//! use tessel_syntax::lexer::Lexer;
//! use tessel_syntax::token::TokenKind;
//!
//! let kinds: Vec<_> = Lexer::new("(print \"hi\") ; done")
//!     .map(|tok| tok.kind)
//!     .collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::LParen, TokenKind::Atom, TokenKind::Str, TokenKind::RParen]
//! );
//! ```

use crate::error::LexerError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lazy tokenizer over a borrowed source buffer.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    /// The source being tokenized
    input: &'src str,

    /// Current byte offset
    position: usize,

    /// Current line (1-indexed)
    line: usize,

    /// Current column in characters (1-indexed)
    column: usize,

    /// Set once a string literal runs off the end
    truncation: Option<LexerError>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'src str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
            truncation: None,
        }
    }

    /// The source buffer.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.input
    }

    /// Why the token stream ended early, if it did.
    #[must_use]
    pub fn truncation(&self) -> Option<&LexerError> {
        self.truncation.as_ref()
    }

    /// Scans and returns the next token.
    ///
    /// Once the end is reached every further call returns EOF again.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_trivia();

        let start = self.position;
        let start_line = self.line;
        let start_col = self.column;

        let kind = match self.peek() {
            None => return self.eof(),
            Some(b'(') => {
                self.bump();
                TokenKind::LParen
            }
            Some(b')') => {
                self.bump();
                TokenKind::RParen
            }
            Some(b'"') => {
                let open = Span::new(start, start + 1, start_line, start_col, start_line, start_col + 1);
                if let Err(err) = self.read_string() {
                    tessel_log::debug!("{} at {}", err, open);
                    self.truncation = Some(match err {
                        Truncated::Unterminated => LexerError::UnterminatedString { start: open },
                        Truncated::TrailingEscape => LexerError::TrailingEscape { start: open },
                    });
                    return self.eof();
                }
                TokenKind::Str
            }
            Some(_) => {
                self.read_atom();
                TokenKind::Atom
            }
        };

        let span = Span::new(start, self.position, start_line, start_col, self.line, self.column);
        Token::new(kind, &self.input[start..self.position], span)
    }

    /// Collects every token up to and including EOF.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.is_eof();
            tokens.push(tok);
            if done {
                return tokens;
            }
        }
    }

    fn eof(&mut self) -> Token<'src> {
        self.position = self.input.len();
        let span = Span::point(self.position, self.line, self.column);
        Token::eof(span)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;

        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if byte & 0xC0 != 0x80 {
            // UTF-8 continuation bytes do not start a new column
            self.column += 1;
        }

        Some(byte)
    }

    fn skip_trivia(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.bump();
                }
                b';' => {
                    while let Some(byte) = self.bump() {
                        if byte == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self) -> Result<(), Truncated> {
        self.bump();
        loop {
            match self.bump() {
                None => return Err(Truncated::Unterminated),
                Some(b'"') => return Ok(()),
                Some(b'\\') => {
                    if self.bump().is_none() {
                        return Err(Truncated::TrailingEscape);
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn read_atom(&mut self) {
        while let Some(byte) = self.peek() {
            if is_delimiter(byte) {
                break;
            }
            self.bump();
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.next_token();
        (!tok.is_eof()).then_some(tok)
    }
}

#[derive(Debug, Clone, Copy)]
enum Truncated {
    Unterminated,
    TrailingEscape,
}

impl std::fmt::Display for Truncated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unterminated => f.write_str("unterminated string literal"),
            Self::TrailingEscape => f.write_str("escape at end of input"),
        }
    }
}

const fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'"' | b';' | b'(' | b')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        Lexer::new(source).map(|tok| tok.text).collect()
    }

    #[test]
    fn test_lexer_empty() {
        let tokens = Lexer::new("").tokenize();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_lexer_parens_and_atoms() {
        assert_eq!(texts("(+ 1 2)"), vec!["(", "+", "1", "2", ")"]);
        assert_eq!(texts("((a)b)"), vec!["(", "(", "a", ")", "b", ")"]);
    }

    #[test]
    fn test_lexer_whitespace_and_comments() {
        let source = "  ; header\n\t(set x 1) ; trailing\n; last line without newline";
        assert_eq!(texts(source), vec!["(", "set", "x", "1", ")"]);
    }

    #[test]
    fn test_lexer_atom_stops_at_semicolon_and_quote() {
        assert_eq!(texts("abc;comment\ndef"), vec!["abc", "def"]);
        assert_eq!(texts("abc\"s\""), vec!["abc", "\"s\""]);
    }

    #[test]
    fn test_lexer_string_literal() {
        let tokens = Lexer::new(r#"(print "a b")"#).tokenize();
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, "\"a b\"");
    }

    #[test]
    fn test_lexer_string_escape() {
        let tokens: Vec<_> = Lexer::new(r#""say \"hi\"" x"#).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, r#""say \"hi\"""#);
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_lexer_unterminated_string_truncates() {
        let mut lexer = Lexer::new("(print \"oops");
        assert_eq!(lexer.next_token().kind, TokenKind::LParen);
        assert_eq!(lexer.next_token().kind, TokenKind::Atom);
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
        assert!(matches!(
            lexer.truncation(),
            Some(LexerError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_lexer_trailing_backslash_truncates() {
        let mut lexer = Lexer::new("\"abc\\");
        assert!(lexer.next_token().is_eof());
        assert!(matches!(lexer.truncation(), Some(LexerError::TrailingEscape { .. })));
    }

    #[test]
    fn test_lexer_tokens_cover_source() {
        let source = "(defun (main) (print \"x\"))";
        for tok in Lexer::new(source) {
            assert_eq!(tok.span.slice(source), Some(tok.text));
            assert!(!tok.text.is_empty());
        }
    }

    #[test]
    fn test_lexer_line_and_column() {
        let tokens = Lexer::new("(a\n  bé c)").tokenize();
        assert_eq!((tokens[1].span.start_line, tokens[1].span.start_col), (1, 2));
        assert_eq!((tokens[2].span.start_line, tokens[2].span.start_col), (2, 3));
        // "bé" is two characters wide
        assert_eq!((tokens[3].span.start_line, tokens[3].span.start_col), (2, 6));
    }

    #[test]
    fn test_lexer_crlf_line_endings() {
        let source = "(set x 1)\r\n(print x)\r\nend\r\n";
        assert_eq!(
            texts(source),
            vec!["(", "set", "x", "1", ")", "(", "print", "x", ")", "end"]
        );
        let tokens = Lexer::new(source).tokenize();
        assert_eq!((tokens[5].span.start_line, tokens[5].span.start_col), (2, 1));
    }

    #[test]
    fn test_lexer_non_ascii_atom() {
        assert_eq!(texts("(print héllo)"), vec!["(", "print", "héllo", ")"]);
    }
}
