//! Literal decoding.
//!
//! Numbers follow the C library conventions the language grew up with:
//! integers accept an optional sign and a `0x` (hex) or leading `0` (octal)
//! prefix, floats accept the usual decimal forms plus `inf`/`nan`. In both
//! cases the *whole* atom must be consumed, so `1.0` is not an int and `1.0a`
//! is not a float.
//!
//! ```
//! use tessel_syntax::literal::{parse_float, parse_int};
//!
//! assert_eq!(parse_int("0x1F"), Some(31));
//! assert_eq!(parse_int("-010"), Some(-8));
//! assert_eq!(parse_int("1.0"), None);
//! assert_eq!(parse_float("2.5e3"), Some(2500.0));
//! ```

/// Parses an integer atom.
///
/// Values outside the `i64` range saturate.
#[must_use]
pub fn parse_int(text: &str) -> Option<i64> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let mut value: i64 = 0;
    let mut overflow = false;
    for c in digits.chars() {
        let digit = i64::from(c.to_digit(radix)?);
        match value
            .checked_mul(i64::from(radix))
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
        {
            Some(v) => value = v,
            None => {
                overflow = true;
                break;
            }
        }
    }

    if overflow {
        return Some(if negative { i64::MIN } else { i64::MAX });
    }
    Some(value)
}

/// Parses a float atom.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    // Hex floats (`0x1p3`) are not accepted.
    text.parse::<f64>().ok()
}

/// Decodes the body of a string literal token (quotes included).
///
/// `\n` and `\t` become newline and tab; a backslash before any other
/// character yields that character.
#[must_use]
pub fn unescape(token: &str) -> String {
    let inner = token
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(token);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
