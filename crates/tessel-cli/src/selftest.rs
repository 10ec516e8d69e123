//! Built-in self checks for `tessel --test`.

use tessel_syntax::literal::{parse_float, parse_int};
use tessel_syntax::{Lexer, Token};

/// One named check.
struct Check {
    name: &'static str,
    run: fn() -> bool,
}

fn first_token(source: &str) -> Token<'_> {
    Lexer::new(source).next_token()
}

const CHECKS: &[Check] = &[
    Check {
        name: "equal token text",
        run: || first_token("Something").same_text(&first_token("Something")),
    },
    Check {
        name: "longer token text differs",
        run: || !first_token("Something123").same_text(&first_token("Something")),
    },
    Check {
        name: "shorter token text differs",
        run: || !first_token("Something").same_text(&first_token("Something123")),
    },
    Check {
        name: "int rejects a decimal point",
        run: || parse_int("1.0").is_none(),
    },
    Check {
        name: "int rejects a suffix",
        run: || parse_int("1.0f").is_none(),
    },
    Check {
        name: "float rejects trailing text",
        run: || parse_float("1.0a").is_none(),
    },
    Check {
        name: "int accepts a digit",
        run: || parse_int("1").is_some(),
    },
];

/// Runs every check, reporting failures on stderr. Returns `true` if all
/// passed.
pub fn run() -> bool {
    let mut failed = 0;
    for check in CHECKS {
        if (check.run)() {
            tessel_log::debug!("self check passed: {}", check.name);
        } else {
            eprintln!("self check failed: {}", check.name);
            failed += 1;
        }
    }
    tessel_log::info!("{} of {} self checks passed", CHECKS.len() - failed, CHECKS.len());
    failed == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        for check in CHECKS {
            assert!((check.run)(), "{}", check.name);
        }
        assert!(run());
    }
}
