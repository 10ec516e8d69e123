//! The S-expression tree.
//!
//! A program is a single root [`Branch`] whose children are the top-level
//! forms. Every parenthesised form becomes a `Branch`; every atom or string
//! literal becomes a [`Leaf`]. Leaves are classified once, when they are
//! built, so the evaluator never re-parses literal text.
//!
//! Both node kinds carry an optional resolver annotation. For leaves this is
//! a [`Binding`] (which function or which local slot an identifier refers
//! to); for branches it is an index (the function index on a prototype, the
//! local count on a `defun`).

use crate::keywords::Keyword;
use crate::literal::{parse_float, parse_int, unescape};
use crate::span::{Span, Spanned};
use crate::token::{Token, TokenKind};
use std::rc::Rc;

/// What a leaf denotes.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafKind {
    /// A string literal, already unescaped
    Str(Rc<str>),

    /// `true` or `false`
    Bool(bool),

    /// `null`
    Null,

    /// Integer literal
    Int(i64),

    /// Float literal
    Float(f64),

    /// Reserved word
    Keyword(Keyword),

    /// Anything else
    Identifier,
}

impl LeafKind {
    /// Classifies a token.
    ///
    /// Precedence: string, bool, `null`, int, float, keyword, identifier.
    #[must_use]
    pub fn classify(token: &Token<'_>) -> Self {
        if token.kind == TokenKind::Str {
            return Self::Str(Rc::from(unescape(token.text)));
        }

        let text = token.text;
        match text {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            "null" => return Self::Null,
            _ => {}
        }

        if let Some(value) = parse_int(text) {
            Self::Int(value)
        } else if let Some(value) = parse_float(text) {
            Self::Float(value)
        } else if let Some(kw) = Keyword::lookup(text) {
            Self::Keyword(kw)
        } else {
            Self::Identifier
        }
    }
}

/// Resolver annotation on an identifier leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Index into the function table
    Function(usize),

    /// Slot relative to the current frame base
    Local(usize),
}

impl Binding {
    /// The raw index, regardless of kind.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Function(idx) | Self::Local(idx) => idx,
        }
    }
}

/// An atom or string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'src> {
    /// The token the leaf was built from
    pub token: Token<'src>,

    /// Classified payload
    pub kind: LeafKind,

    /// Set by the resolver on identifiers
    pub binding: Option<Binding>,
}

impl<'src> Leaf<'src> {
    /// Builds and classifies a leaf.
    #[must_use]
    pub fn new(token: Token<'src>) -> Self {
        Self {
            kind: LeafKind::classify(&token),
            token,
            binding: None,
        }
    }

    /// The source text.
    #[must_use]
    pub fn text(&self) -> &'src str {
        self.token.text
    }

    /// The keyword, if this leaf is one.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            LeafKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// The identifier text, if this leaf is one.
    #[must_use]
    pub fn identifier(&self) -> Option<&'src str> {
        matches!(self.kind, LeafKind::Identifier).then_some(self.token.text)
    }
}

/// A parenthesised form (or the root).
#[derive(Debug, Clone, PartialEq)]
pub struct Branch<'src> {
    /// Sub-forms in source order
    pub children: Vec<Node<'src>>,

    /// From `(` to `)`, or the whole input for the root
    pub span: Span,

    /// Set by the resolver on prototypes and `defun` forms
    pub id: Option<usize>,
}

impl<'src> Branch<'src> {
    /// Creates an unannotated branch.
    #[must_use]
    pub fn new(children: Vec<Node<'src>>, span: Span) -> Self {
        Self {
            children,
            span,
            id: None,
        }
    }

    /// The first child.
    #[must_use]
    pub fn head(&self) -> Option<&Node<'src>> {
        self.children.first()
    }

    /// The keyword in head position, if any.
    #[must_use]
    pub fn head_keyword(&self) -> Option<Keyword> {
        self.head()?.as_leaf()?.keyword()
    }

    /// Children after the head.
    #[must_use]
    pub fn operands(&self) -> &[Node<'src>] {
        self.children.get(1..).unwrap_or_default()
    }

    /// Deepest parenthesis nesting below this branch.
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_branch)
            .map(|b| 1 + b.nesting_depth())
            .max()
            .unwrap_or(0)
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// Atom or string literal
    Leaf(Leaf<'src>),

    /// Parenthesised form
    Branch(Branch<'src>),
}

impl<'src> Node<'src> {
    /// Returns the leaf, if this is one.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&Leaf<'src>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    /// Returns the branch, if this is one.
    #[must_use]
    pub fn as_branch(&self) -> Option<&Branch<'src>> {
        match self {
            Self::Branch(branch) => Some(branch),
            Self::Leaf(_) => None,
        }
    }

    /// Mutable access to the leaf, if this is one.
    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf<'src>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    /// Mutable access to the branch, if this is one.
    pub fn as_branch_mut(&mut self) -> Option<&mut Branch<'src>> {
        match self {
            Self::Branch(branch) => Some(branch),
            Self::Leaf(_) => None,
        }
    }

    /// Returns `true` for a branch.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// Leaves in source order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Leaf<'src>> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Self::Leaf(leaf) => out.push(leaf),
                Self::Branch(branch) => pending.extend(branch.children.iter().rev()),
            }
        }
        out
    }
}

impl Spanned for Node<'_> {
    fn span(&self) -> Span {
        match self {
            Self::Leaf(leaf) => leaf.token.span,
            Self::Branch(branch) => branch.span,
        }
    }
}

impl Spanned for Leaf<'_> {
    fn span(&self) -> Span {
        self.token.span
    }
}

impl Spanned for Branch<'_> {
    fn span(&self) -> Span {
        self.span
    }
}
