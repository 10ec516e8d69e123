//! Source locations.
//!
//! Every token and tree node remembers where it came from so that fatal
//! errors can point at the offending form.
//!
//! ```
//! use tessel_syntax::span::Span;
//!
//! let open = Span::new(0, 1, 1, 1, 1, 2);
//! let close = Span::new(9, 10, 1, 10, 1, 11);
//! let form = Span::merge(open, close);
//!
//! assert_eq!(form.len(), 10);
//! assert_eq!(form.to_string(), "1:1");
//! ```

use std::fmt;

/// A byte range in the source plus the line/column of both ends.
///
/// Lines and columns are 1-indexed; columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte
    pub start: usize,

    /// Byte offset one past the last byte
    pub end: usize,

    /// Line of `start`
    pub start_line: usize,

    /// Column of `start`
    pub start_col: usize,

    /// Line of `end`
    pub end_line: usize,

    /// Column of `end`
    pub end_col: usize,
}

impl Span {
    /// Creates a span from offsets and positions.
    #[must_use]
    pub const fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A zero-length span, used for end of input.
    #[must_use]
    pub const fn point(offset: usize, line: usize, col: usize) -> Self {
        Self::new(offset, offset, line, col, line, col)
    }

    /// Covers everything from the start of `left` to the end of `right`.
    #[must_use]
    pub const fn merge(left: Span, right: Span) -> Self {
        Self {
            start: left.start,
            end: right.end,
            start_line: left.start_line,
            start_col: left.start_col,
            end_line: right.end_line,
            end_col: right.end_col,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source text this span covers, if it lies within `source`.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Anything that can report where it came from.
pub trait Spanned {
    /// The source span of this item.
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}
