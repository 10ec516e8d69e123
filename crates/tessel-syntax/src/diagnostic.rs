//! Diagnostic rendering.
//!
//! Every fatal error in the pipeline ends up as exactly one line on stderr:
//!
//! ```text
//! error: unmatched ')' at 3:14
//! ```
//!
//! A truncated token stream is reported the same way at warning level, and
//! execution continues.

use crate::span::{Span, Spanned};
use std::fmt;
use std::io::{self, Write};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Execution stops
    Error,
    /// Execution continues
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

impl DiagnosticLevel {
    /// ANSI color for this level.
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
        }
    }

    /// Formats the level name, colored if requested.
    #[must_use]
    pub fn format_colored(&self, use_colors: bool) -> String {
        if use_colors {
            format!("{}{}\x1b[0m", self.color_code(), self)
        } else {
            self.to_string()
        }
    }
}

/// A message tied to a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Where it happened
    pub span: Span,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
            span,
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
            span,
        }
    }

    /// Builds an error diagnostic from anything displayable with a span.
    pub fn from_error<E: fmt::Display + Spanned>(err: &E) -> Self {
        Self::error(err.to_string(), err.span())
    }

    /// Builds a warning diagnostic from a non-fatal condition.
    pub fn from_warning<E: fmt::Display + Spanned>(err: &E) -> Self {
        Self::warning(err.to_string(), err.span())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.level, self.message, self.span)
    }
}

/// Writes diagnostics to a sink.
pub struct Emitter<W: Write> {
    /// Output sink (stderr for the CLI)
    out: W,
    /// Color the level name
    use_colors: bool,
}

impl<W: Write> Emitter<W> {
    /// Creates an emitter writing to `out`.
    pub fn new(out: W, use_colors: bool) -> Self {
        Self { out, use_colors }
    }

    /// Writes one diagnostic line.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the sink.
    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(
            self.out,
            "{}: {} at {}",
            diagnostic.level.format_colored(self.use_colors),
            diagnostic.message,
            diagnostic.span
        )
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
