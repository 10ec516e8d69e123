//! Reserved words.
//!
//! Every built-in operation and statement form is spelled with a keyword. An
//! atom whose text matches one of these is never an identifier.

use std::fmt;

/// All reserved spellings, in [`Keyword`] declaration order.
pub const KEYWORDS: &[&str] = &[
    "defun", "set", "if", "else", "while", "print", "+", "-", "*", "/", "%", "=", "<", ">",
    "!", "&", "|", "list", "table", "item", "len", "setitem", "index", "push", "remove",
    "bool", "int", "float", "str", "return", "for", "type", "ternary",
];

/// Number of keywords.
pub const KEYWORD_COUNT: usize = KEYWORDS.len();

/// A reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Keyword {
    Defun,
    Set,
    If,
    Else,
    While,
    Print,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Lt,
    Gt,
    Not,
    And,
    Or,
    List,
    Table,
    Item,
    Len,
    SetItem,
    Index,
    Push,
    Remove,
    Bool,
    Int,
    Float,
    Str,
    Return,
    For,
    Type,
    Ternary,
}

const ALL: [Keyword; KEYWORD_COUNT] = [
    Keyword::Defun,
    Keyword::Set,
    Keyword::If,
    Keyword::Else,
    Keyword::While,
    Keyword::Print,
    Keyword::Add,
    Keyword::Sub,
    Keyword::Mul,
    Keyword::Div,
    Keyword::Mod,
    Keyword::Eq,
    Keyword::Lt,
    Keyword::Gt,
    Keyword::Not,
    Keyword::And,
    Keyword::Or,
    Keyword::List,
    Keyword::Table,
    Keyword::Item,
    Keyword::Len,
    Keyword::SetItem,
    Keyword::Index,
    Keyword::Push,
    Keyword::Remove,
    Keyword::Bool,
    Keyword::Int,
    Keyword::Float,
    Keyword::Str,
    Keyword::Return,
    Keyword::For,
    Keyword::Type,
    Keyword::Ternary,
];

impl Keyword {
    /// Looks up an exact spelling.
    #[must_use]
    pub fn lookup(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .position(|kw| *kw == text)
            .map(|idx| ALL[idx])
    }

    /// The source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        KEYWORDS[self as usize]
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
