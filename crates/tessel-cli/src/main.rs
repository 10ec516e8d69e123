//! `tessel`: run a tessel program.
//!
//! The program comes from FILE, or from stdin when no file is given.
//! Program output goes to stdout; diagnostics and logs go to stderr.
//!
//! Exit status: 0 on success, 1 on a fatal program error (including source
//! that is not UTF-8) or a failed `--test`, 2 when the source cannot be read.

mod selftest;

use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tessel_interpreter::{Config, Error, Interpreter, resolve};
use tessel_log::Level;
use tessel_syntax::{Diagnostic, Emitter};

/// tessel is a small S-expression language run by a tree-walking
/// interpreter.
#[derive(Parser, Debug)]
#[command(name = "tessel", version, about, long_about = None)]
struct Args {
    /// Source file. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Run the built-in self checks and exit.
    #[arg(long)]
    test: bool,

    /// Print the resolved tree instead of running the program.
    #[arg(long)]
    dump_tree: bool,

    /// Log level: error, warn, info, debug or trace. Overrides TESSEL_LOG.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<Level>,

    /// Stop with an error once user calls nest deeper than N.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tessel_log::init_from_env();
    if let Some(level) = args.log_level {
        tessel_log::set_level(level);
    }

    if args.test {
        return if selftest::run() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let bytes = match read_source(args.file.as_deref()) {
        Ok(bytes) => bytes,
        Err(err) => {
            let name = args
                .file
                .as_deref()
                .map_or_else(|| "<stdin>".into(), Path::to_string_lossy);
            eprintln!("tessel: cannot read {name}: {err}");
            return ExitCode::from(2);
        }
    };
    let source = match tessel_syntax::decode_source(bytes) {
        Ok(source) => source,
        Err(err) => {
            report(&Diagnostic::from_error(&err));
            return ExitCode::FAILURE;
        }
    };

    let config = Config {
        max_call_depth: args.max_depth,
    };
    let mut out = BufWriter::new(io::stdout().lock());
    let result = execute(&source, &mut out, config, args.dump_tree);
    if let Err(err) = out.flush() {
        tessel_log::error!("failed to flush stdout: {}", err);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&Diagnostic::from_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn read_source(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn execute<W: Write>(source: &str, out: &mut W, config: Config, dump: bool) -> Result<(), Error> {
    let parsed = tessel_syntax::parse_full(source)?;
    if let Some(truncation) = &parsed.truncation {
        report(&Diagnostic::from_warning(truncation));
    }
    let program = resolve(parsed.root)?;
    tessel_log::debug!("resolved {} function(s)", program.functions().len());

    if dump {
        return writeln!(out, "{}", program.dump()).map_err(|err| {
            tessel_interpreter::RuntimeError::Output {
                message: err.to_string(),
                span: program.root().span,
            }
            .into()
        });
    }

    let mut interpreter = Interpreter::new(&program, out, config);
    interpreter.run()?;
    Ok(())
}

fn report(diagnostic: &Diagnostic) {
    let stderr = io::stderr();
    let use_colors = stderr.is_terminal();
    let mut emitter = Emitter::new(stderr.lock(), use_colors);
    if let Err(io_err) = emitter.emit(diagnostic) {
        tessel_log::error!("failed to write diagnostic: {}", io_err);
    }
}
