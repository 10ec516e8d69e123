//! Symbol handles for interned names.
//!
//! A symbol is the dense index an [`Interner`](crate::Interner) assigned to a
//! name. Because indices are handed out `0, 1, 2, ...` in first-use order, a
//! symbol can be used directly as a function-table index or a local slot.
//!
//! # Examples
//!
//! ```
//! use tessel_mem::Symbol;
//!
//! let sym = Symbol::new(3);
//! assert_eq!(sym.index(), 3);
//! assert_eq!(sym, Symbol::from(3));
//! ```

use std::fmt;

/// A dense handle for an interned name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Creates a symbol from a raw index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize`, ready for slice indexing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Symbol {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
