//! Arithmetic builtins.
//!
//! `int op int` stays integral (wrapping on overflow); any int/float mix
//! widens to float; `+` also concatenates two strings. Anything else, or an
//! absent operand, gives an absent result.

use crate::value::Value;

enum Operands {
    Ints(i64, i64),
    Floats(f64, f64),
}

#[allow(clippy::cast_precision_loss)]
fn numeric(left: Option<&Value>, right: Option<&Value>) -> Option<Operands> {
    match (left?, right?) {
        (Value::Int(a), Value::Int(b)) => Some(Operands::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Some(Operands::Floats(*a as f64, *b)),
        (Value::Float(a), Value::Int(b)) => Some(Operands::Floats(*a, *b as f64)),
        (Value::Float(a), Value::Float(b)) => Some(Operands::Floats(*a, *b)),
        _ => None,
    }
}

/// `(+ a b)`
#[must_use]
pub fn add(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    if let (Some(Value::Str(a)), Some(Value::Str(b))) = (left, right) {
        let mut joined = String::with_capacity(a.len() + b.len());
        joined.push_str(a);
        joined.push_str(b);
        return Some(Value::str(joined));
    }

    Some(match numeric(left, right)? {
        Operands::Ints(a, b) => Value::Int(a.wrapping_add(b)),
        Operands::Floats(a, b) => Value::Float(a + b),
    })
}

/// `(- a b)`
#[must_use]
pub fn sub(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    Some(match numeric(left, right)? {
        Operands::Ints(a, b) => Value::Int(a.wrapping_sub(b)),
        Operands::Floats(a, b) => Value::Float(a - b),
    })
}

/// `(- a)`
#[must_use]
pub fn neg(value: Option<&Value>) -> Option<Value> {
    match value? {
        Value::Int(n) => Some(Value::Int(n.wrapping_neg())),
        Value::Float(x) => Some(Value::Float(0.0 - x)),
        _ => None,
    }
}

/// `(* a b)`
#[must_use]
pub fn mul(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    Some(match numeric(left, right)? {
        Operands::Ints(a, b) => Value::Int(a.wrapping_mul(b)),
        Operands::Floats(a, b) => Value::Float(a * b),
    })
}

/// `(/ a b)`. Integer division truncates; dividing an int by zero is absent.
#[must_use]
pub fn div(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    match numeric(left, right)? {
        Operands::Ints(_, 0) => None,
        Operands::Ints(a, b) => Some(Value::Int(a.wrapping_div(b))),
        Operands::Floats(a, b) => Some(Value::Float(a / b)),
    }
}

/// `(% a b)`. The result takes the divisor's sign.
#[must_use]
pub fn rem(left: Option<&Value>, right: Option<&Value>) -> Option<Value> {
    match numeric(left, right)? {
        Operands::Ints(_, 0) => None,
        Operands::Ints(a, b) => Some(Value::Int(int_mod(a, b))),
        Operands::Floats(a, b) => Some(Value::Float(float_mod(a, b))),
    }
}

/// Floor-style integer modulo. `right` must be non-zero.
#[must_use]
pub fn int_mod(left: i64, right: i64) -> i64 {
    let rem = left.wrapping_rem(right);
    if rem != 0 && (rem < 0) != (right < 0) {
        rem.wrapping_add(right)
    } else {
        rem
    }
}

/// Floor-style float modulo.
#[must_use]
pub fn float_mod(left: f64, right: f64) -> f64 {
    let rem = left % right;
    if rem != 0.0 && (rem < 0.0) != (right < 0.0) {
        rem + right
    } else {
        rem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Option<Value> {
        Some(Value::Int(n))
    }

    fn float(x: f64) -> Option<Value> {
        Some(Value::Float(x))
    }

    #[test]
    fn test_add_types() {
        assert!(matches!(add(int(1).as_ref(), int(2).as_ref()), Some(Value::Int(3))));
        assert!(matches!(add(int(1).as_ref(), float(0.5).as_ref()), Some(Value::Float(x)) if x == 1.5));
        let joined = add(Some(&Value::str("a")), Some(&Value::str("b"))).unwrap();
        assert_eq!(joined.to_string(), "\"ab\"");
        assert!(add(Some(&Value::str("a")), int(1).as_ref()).is_none());
        assert!(add(Some(&Value::Bool(true)), int(1).as_ref()).is_none());
        assert!(add(None, int(1).as_ref()).is_none());
    }

    #[test]
    fn test_wrapping() {
        assert!(matches!(add(int(i64::MAX).as_ref(), int(1).as_ref()), Some(Value::Int(i64::MIN))));
        assert!(matches!(neg(int(i64::MIN).as_ref()), Some(Value::Int(i64::MIN))));
        assert!(matches!(div(int(i64::MIN).as_ref(), int(-1).as_ref()), Some(Value::Int(i64::MIN))));
    }

    #[test]
    fn test_division() {
        assert!(matches!(div(int(7).as_ref(), int(2).as_ref()), Some(Value::Int(3))));
        assert!(matches!(div(int(-7).as_ref(), int(2).as_ref()), Some(Value::Int(-3))));
        assert!(div(int(1).as_ref(), int(0).as_ref()).is_none());
        assert!(matches!(div(float(1.0).as_ref(), int(0).as_ref()), Some(Value::Float(x)) if x.is_infinite()));
    }

    #[test]
    fn test_neg() {
        assert!(matches!(neg(int(5).as_ref()), Some(Value::Int(-5))));
        assert!(matches!(neg(float(2.5).as_ref()), Some(Value::Float(x)) if x == -2.5));
        assert!(neg(Some(&Value::str("x"))).is_none());
    }

    #[test]
    fn test_int_mod_sign_follows_divisor() {
        for a in -9_i64..=9 {
            for b in [-4_i64, -3, -1, 1, 3, 4] {
                let m = int_mod(a, b);
                assert!(m == 0 || (m < 0) == (b < 0), "{a} % {b} = {m}");
                assert!(m.abs() < b.abs());
                assert_eq!((a - m) % b, 0);
            }
        }
        assert_eq!(int_mod(-7, 3), 2);
        assert_eq!(int_mod(7, -3), -2);
        assert_eq!(int_mod(6, -3), 0);
    }

    #[test]
    fn test_float_mod_sign_follows_divisor() {
        for a in [-7.5, -2.0, 0.5, 3.25, 9.0] {
            for b in [-2.0, -0.75, 0.75, 2.0] {
                let m = float_mod(a, b);
                assert!(m == 0.0 || (m < 0.0) == (b < 0.0), "{a} % {b} = {m}");
            }
        }
        assert_eq!(float_mod(-7.0, 3.0), 2.0);
    }

    #[test]
    fn test_rem_mixed_and_zero() {
        assert!(matches!(rem(int(-7).as_ref(), float(3.0).as_ref()), Some(Value::Float(x)) if x == 2.0));
        assert!(rem(int(5).as_ref(), int(0).as_ref()).is_none());
        assert!(rem(Some(&Value::str("a")), int(2).as_ref()).is_none());
    }
}
