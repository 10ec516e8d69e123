//! Name bookkeeping for the `tessel` resolver.
//!
//! - [`Symbol`]: a 32-bit handle for an interned name
//! - [`Interner`]: hands out symbols in first-use order, so the symbol of a
//!   name doubles as its table index or stack slot
//!
//! Names are borrowed from the source buffer; nothing here copies text.

pub mod interner;
pub mod symbol;

pub use interner::Interner;
pub use symbol::Symbol;
