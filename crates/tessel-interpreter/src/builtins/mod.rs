//! Builtin operations on values.
//!
//! Everything in the submodules is a pure function of already-evaluated
//! operands; the evaluator owns operand evaluation, short-circuiting and
//! arity checking (through [`Arity`]).

pub mod arith;
pub mod collection;
pub mod compare;
pub mod convert;

use tessel_syntax::Keyword;

/// Accepted operand counts for a keyword form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n`
    Exact(usize),

    /// `min..=max`
    Range(usize, usize),

    /// Any even number
    Even,

    /// Any number
    Any,
}

impl Arity {
    /// Operand counts accepted by `keyword`, or `None` for forms whose
    /// shape is checked structurally (`defun`, `if`, `while`, `for`, `else`).
    #[must_use]
    pub const fn of(keyword: Keyword) -> Option<Self> {
        use Keyword::*;
        Some(match keyword {
            Add | Mul | Div | Mod | Eq | Lt | Gt | And | Or | Item | Index | Push | Remove
            | Set => Arity::Exact(2),
            Sub => Arity::Range(1, 2),
            Not | Len | Bool | Int | Float | Str | Type | Print => Arity::Exact(1),
            SetItem | Ternary => Arity::Exact(3),
            Return => Arity::Range(0, 1),
            List => Arity::Any,
            Table => Arity::Even,
            Defun | If | Else | While | For => return None,
        })
    }

    /// Returns `true` if `count` operands are acceptable.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => count >= min && count <= max,
            Arity::Even => count % 2 == 0,
            Arity::Any => true,
        }
    }

    /// Human-readable form for error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Arity::Exact(0) => "0",
            Arity::Exact(1) => "1",
            Arity::Exact(2) => "2",
            Arity::Exact(3) => "3",
            Arity::Exact(_) => "a fixed number of",
            Arity::Range(0, 1) => "0 or 1",
            Arity::Range(1, 2) => "1 or 2",
            Arity::Range(..) => "a bounded number of",
            Arity::Even => "an even number of",
            Arity::Any => "any number of",
        }
    }
}
