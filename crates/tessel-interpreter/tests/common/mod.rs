//! Shared helpers for interpreter integration tests.

#![allow(dead_code)]

use tessel_interpreter::{Config, Error, run_source};

/// Runs `source` and returns everything it printed.
pub fn run(source: &str) -> String {
    let mut out = Vec::new();
    if let Err(err) = run_source(source, &mut out, Config::default()) {
        panic!("program failed: {err}\n--- source ---\n{source}");
    }
    String::from_utf8(out).expect("program output should be UTF-8")
}

/// Runs `source`, expecting a fatal error; returns the error and the output
/// printed before it.
pub fn fail(source: &str) -> (Error, String) {
    let mut out = Vec::new();
    let err = run_source(source, &mut out, Config::default())
        .expect_err("program should fail");
    (err, String::from_utf8(out).expect("program output should be UTF-8"))
}

/// Wraps statements in a `main` function.
pub fn main_with(body: &str) -> String {
    format!("(defun (main)\n{body}\n)")
}
