//! Tessel syntax: lexer, tree and parser.
//!
//! The frontend turns source text into an S-expression tree:
//!
//! - [`lexer`] - lazy tokenization over the source buffer
//! - [`literal`] - number and string literal decoding
//! - [`ast`] - tree nodes, leaf classification and resolver annotations
//! - [`parser`] - stack-based tree construction
//! - [`diagnostic`] - one-line error rendering
//! - [`pretty`] - tree dump
//!
//! Tokens and leaves borrow from the source, so the tree lives no longer
//! than the text it was parsed from.
//!
//! # Examples
//!
//! ```
//! use tessel_syntax::{parse, LeafKind};
//!
//! let tree = parse("(print 1.5)").unwrap();
//! let leaves = tree.leaves();
//!
//! assert_eq!(leaves[1].kind, LeafKind::Float(1.5));
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;

pub use ast::{Binding, Branch, Leaf, LeafKind, Node};
pub use diagnostic::{Diagnostic, DiagnosticLevel, Emitter};
pub use error::{LexerError, ParserError, ParserResult};
pub use keywords::Keyword;
pub use lexer::Lexer;
pub use parser::{Parsed, Parser, decode_source, parse, parse_full};
pub use pretty::dump_tree;
pub use span::{Span, Spanned};
pub use token::{Token, TokenKind};
