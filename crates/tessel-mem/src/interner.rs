//! First-use-order name interning.
//!
//! The resolver needs two kinds of name tables: one for functions (where
//! `main` must always own index 0) and one per function for local variables
//! (where parameters claim the lowest indices simply because they are seen
//! first). Both are the same structure: a map from name to [`Symbol`] plus the
//! reverse list, with symbols handed out densely as names are first seen.
//!
//! # Examples
//!
//! ```
//! use tessel_mem::Interner;
//!
//! let mut names = Interner::with_reserved(&["main"]);
//! let add = names.intern("add");
//! let again = names.intern("add");
//!
//! assert_eq!(add, again);
//! assert_eq!(add.index(), 1);
//! assert_eq!(names.resolve(add), Some("add"));
//! assert_eq!(names.lookup("main").map(|s| s.index()), Some(0));
//! ```

use crate::symbol::Symbol;
use fxhash::FxBuildHasher;

#[cfg(feature = "symbols")]
use hashbrown::HashMap;

#[cfg(not(feature = "symbols"))]
use std::collections::HashMap;

/// Interns borrowed names, assigning symbols in first-use order.
#[derive(Debug, Clone, Default)]
pub struct Interner<'src> {
    /// Symbol index to name
    names: Vec<&'src str>,

    /// Name to symbol
    symbols: HashMap<&'src str, Symbol, FxBuildHasher>,
}

impl<'src> Interner<'src> {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interner whose first symbols are `reserved`, in order.
    #[must_use]
    pub fn with_reserved(reserved: &[&'src str]) -> Self {
        let mut interner = Self::new();
        for name in reserved {
            interner.intern(name);
        }
        interner
    }

    /// Returns the symbol for `name`, assigning the next index if it is new.
    pub fn intern(&mut self, name: &'src str) -> Symbol {
        if let Some(&sym) = self.symbols.get(name) {
            return sym;
        }

        let sym = Symbol::new(
            u32::try_from(self.names.len()).expect("more than u32::MAX interned names"),
        );
        self.names.push(name);
        self.symbols.insert(name, sym);
        sym
    }

    /// Returns the symbol for `name` without interning it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Returns `true` if `name` has been interned.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Returns the name behind `sym`.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&'src str> {
        self.names.get(sym.index()).copied()
    }

    /// Number of interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Forgets every name, keeping allocations for reuse.
    pub fn clear(&mut self) {
        self.names.clear();
        self.symbols.clear();
    }

    /// Iterates names in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &'src str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (Symbol::new(i as u32), *name))
    }
}
