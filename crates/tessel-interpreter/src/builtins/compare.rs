//! Comparison builtins.

use crate::value::Value;
use std::cmp::Ordering;

/// `(= a b)`: same-kind equality for bools, ints, floats and strings.
///
/// Mixed kinds, containers and absent operands are never equal.
#[must_use]
pub fn equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a == b,
        (Some(Value::Int(a)), Some(Value::Int(b))) => a == b,
        (Some(Value::Float(a)), Some(Value::Float(b))) => a == b,
        (Some(Value::Str(a)), Some(Value::Str(b))) => a == b,
        _ => false,
    }
}

enum Num {
    Int(i64),
    Float(f64),
}

fn as_num(value: &Value) -> Option<Num> {
    match value {
        Value::Bool(b) => Some(Num::Int(i64::from(*b))),
        Value::Int(n) => Some(Num::Int(*n)),
        Value::Float(x) => Some(Num::Float(*x)),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(num: &Num) -> f64 {
    match num {
        Num::Int(n) => *n as f64,
        Num::Float(x) => *x,
    }
}

/// Orders two operands. `Some(None)` means comparable but unordered (NaN);
/// `None` means the kinds cannot be compared at all.
fn order(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Some(Some(a.cmp(b)));
    }

    let (a, b) = (as_num(left)?, as_num(right)?);
    Some(match (&a, &b) {
        (Num::Int(x), Num::Int(y)) => Some(x.cmp(y)),
        _ => to_f64(&a).partial_cmp(&to_f64(&b)),
    })
}

/// `(< a b)`: numeric across bools, ints and floats, lexicographic for
/// strings, absent for anything else.
#[must_use]
pub fn less(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    let ord = order(left?, right?)?;
    Some(Value::Bool(ord == Some(Ordering::Less)))
}

/// `(> a b)`, the mirror of [`less`].
#[must_use]
pub fn greater(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    let ord = order(left?, right?)?;
    Some(Value::Bool(ord == Some(Ordering::Greater)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_bool(value: Option<Value>, expected: bool) -> bool {
        matches!(value, Some(Value::Bool(b)) if b == expected)
    }

    #[test]
    fn test_equals_same_kind_only() {
        assert!(equals(Some(&Value::Int(2)), Some(&Value::Int(2))));
        assert!(!equals(Some(&Value::Int(2)), Some(&Value::Float(2.0))));
        assert!(equals(Some(&Value::str("ab")), Some(&Value::str("ab"))));
        assert!(!equals(Some(&Value::str("ab")), Some(&Value::str("abc"))));
        assert!(equals(Some(&Value::Bool(false)), Some(&Value::Bool(false))));
        assert!(!equals(None, None));

        let list = Value::list(vec![]);
        assert!(!equals(Some(&list), Some(&list)));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(is_bool(less(Some(&Value::Int(1)), Some(&Value::Int(2))), true));
        assert!(is_bool(less(Some(&Value::Int(2)), Some(&Value::Float(1.5))), false));
        assert!(is_bool(greater(Some(&Value::Float(2.5)), Some(&Value::Int(2))), true));
        assert!(is_bool(less(Some(&Value::Bool(false)), Some(&Value::Bool(true))), true));
        assert!(is_bool(less(Some(&Value::Int(3)), Some(&Value::Int(3))), false));
        assert!(is_bool(greater(Some(&Value::Int(3)), Some(&Value::Int(3))), false));
    }

    #[test]
    fn test_nan_is_unordered() {
        let nan = Value::Float(f64::NAN);
        assert!(is_bool(less(Some(&nan), Some(&Value::Int(1))), false));
        assert!(is_bool(greater(Some(&nan), Some(&Value::Int(1))), false));
    }

    #[test]
    fn test_string_ordering() {
        assert!(is_bool(less(Some(&Value::str("abc")), Some(&Value::str("abd"))), true));
        assert!(is_bool(greater(Some(&Value::str("b")), Some(&Value::str("abc"))), true));
        assert!(is_bool(less(Some(&Value::str("ab")), Some(&Value::str("abc"))), true));
    }

    #[test]
    fn test_incomparable_is_absent() {
        assert!(less(Some(&Value::str("a")), Some(&Value::Int(1))).is_none());
        assert!(greater(Some(&Value::list(vec![])), Some(&Value::Int(1))).is_none());
        assert!(less(None, Some(&Value::Int(1))).is_none());
    }
}
