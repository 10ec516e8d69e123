//! Tessel interpreter: resolution and direct tree execution.
//!
//! This crate takes the tree produced by `tessel-syntax` and runs it:
//! - [`resolve`] - function table and local slot assignment
//! - [`value`] - reference-counted runtime values
//! - [`stack`] - the shared value stack and call frames
//! - [`builtins`] - arithmetic, comparison, conversion and collection ops
//! - [`eval`] - the evaluator/executor
//!
//! # Examples
//!
//! ```
//! use tessel_interpreter::{run_source, Config};
//!
//! let mut out = Vec::new();
//! run_source("(defun (main) (print (% -7 3)))", &mut out, Config::default()).unwrap();
//!
//! assert_eq!(out, b"2\n");
//! ```

#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod eval;
pub mod resolve;
pub mod stack;
pub mod value;

pub use error::{Error, ResolveError, Result, RuntimeError, RuntimeResult};
pub use eval::{Config, Flow, Interpreter};
pub use resolve::{Function, Program, resolve};
pub use stack::CallStack;
pub use value::{Repr, Table, Value};

use std::io::Write;

/// Parses, resolves and runs `source`, writing `print` output to `out`.
///
/// # Errors
///
/// Returns the first fatal error from any stage.
pub fn run_source<W: Write>(source: &str, out: W, config: Config) -> Result<()> {
    let root = tessel_syntax::parse(source)?;
    let program = resolve(root)?;
    tessel_log::debug!("resolved {} function(s)", program.functions().len());

    let mut interpreter = Interpreter::new(&program, out, config);
    interpreter.run()?;
    Ok(())
}
