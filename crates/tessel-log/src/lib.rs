//! Leveled diagnostic logging for the `tessel` interpreter.
//!
//! Everything here writes to **stderr**: a `tessel` program owns stdout, and
//! interpreter chatter must never interleave with what `print` produces.
//!
//! The level is process-global. It starts at [`Level::Warn`], can be taken
//! from the `TESSEL_LOG` environment variable with [`init_from_env`], and can
//! be changed at any time with [`set_level`].
//!
//! # Example
//!
//! ```
//! use tessel_log::{debug, warn, Level};
//!
//! tessel_log::set_level(Level::Debug);
//!
//! let functions = 3;
//! debug!("resolved {} functions", functions);
//! warn!("string literal runs to end of input");
//! ```

use std::fmt::Arguments;
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Name of the environment variable read by [`init_from_env`].
pub const ENV_VAR: &str = "TESSEL_LOG";

/// Severity of a log message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Conditions that abort the run
    Error = 0,
    /// Suspicious input the interpreter recovered from
    Warn = 1,
    /// Coarse progress (program start/finish)
    Info = 2,
    /// Per-stage detail (function table, token counts)
    Debug = 3,
    /// Per-call and per-binding detail
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Upper-case name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use tessel_log::Level;
    ///
    /// assert_eq!("trace".parse::<Level>(), Ok(Level::Trace));
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// Process-wide logger state.
pub struct Logger {
    level: AtomicU8,
    colors: bool,
}

impl Logger {
    fn new(level: Level, colors: bool) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            colors,
        }
    }

    /// Sets the most verbose level that is still emitted.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns `true` if a message at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at [`Level::Warn`] on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn, std::io::stderr().is_terminal()))
}

/// Sets the global level.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the global level from its name.
///
/// # Errors
///
/// Returns the rejected name if it is not a known level.
pub fn set_level_from_str(s: &str) -> Result<(), String> {
    set_level(s.parse()?);
    Ok(())
}

/// Applies `TESSEL_LOG` if it is set.
///
/// An unparsable value is reported once at warn level and otherwise ignored.
pub fn init_from_env() {
    if let Ok(value) = std::env::var(ENV_VAR)
        && let Err(err) = set_level_from_str(&value)
    {
        crate::warn!("ignoring {}: {}", ENV_VAR, err);
    }
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    const RESET: &str = "\x1b[0m";

    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }

    let mut stderr = std::io::stderr().lock();
    let level_str = level.as_str();
    // A closed stderr is not worth aborting the program over.
    let _ = if logger.colors {
        let color = level.color_code();
        writeln!(stderr, "{color}[{level_str}]{RESET} {target}: {args}")
    } else {
        writeln!(stderr, "[{level_str}] {target}: {args}")
    };
}

/// Logs at an explicit level, tagging the line with the caller's module path.
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("error".parse::<Level>(), Ok(Level::Error));
        assert_eq!("Warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" info ".parse::<Level>(), Ok(Level::Info));
        assert_eq!("DEBUG".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("trace".parse::<Level>(), Ok(Level::Trace));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_round_trips_through_u8() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn test_logger_filtering() {
        let logger = Logger::new(Level::Warn, false);

        assert!(logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Warn));
        assert!(!logger.enabled(Level::Info));

        logger.set_level(Level::Trace);
        assert!(logger.enabled(Level::Trace));
        assert_eq!(logger.level(), Level::Trace);
    }

    #[test]
    fn test_set_level_from_str_rejects_garbage() {
        assert!(set_level_from_str("nope").is_err());
        set_level_from_str("error").unwrap();
        assert_eq!(get_logger().level(), Level::Error);
        set_level(Level::Warn);
    }

    #[test]
    fn test_macros_compile_at_every_level() {
        error!("error {}", 1);
        warn!("warn {}", 2);
        info!("info {}", 3);
        debug!("debug {:?}", [4]);
        trace!("trace");
    }
}
