//! Conversion builtins: `bool`, `int`, `float`, `str`, `type`.

use crate::value::{Value, format_float, truthy};
use tessel_syntax::literal::{parse_float, parse_int};

/// `(bool x)`
#[must_use]
pub fn to_bool(value: Option<&Value>) -> Value {
    Value::Bool(truthy(value))
}

/// `(int x)`. Floats truncate toward zero, saturating at the `i64` range;
/// strings must hold a whole integer literal.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_int(value: Option<&Value>) -> Option<Value> {
    match value? {
        Value::Bool(b) => Some(Value::Int(i64::from(*b))),
        Value::Int(n) => Some(Value::Int(*n)),
        Value::Float(x) => Some(Value::Int(*x as i64)),
        Value::Str(s) => parse_int(s).map(Value::Int),
        _ => None,
    }
}

/// `(float x)`. Strings must hold a whole float literal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_float(value: Option<&Value>) -> Option<Value> {
    match value? {
        Value::Bool(b) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Int(n) => Some(Value::Float(*n as f64)),
        Value::Float(x) => Some(Value::Float(*x)),
        Value::Str(s) => parse_float(s).map(Value::Float),
        _ => None,
    }
}

/// `(str x)`. A string converts to itself (the same shared text); scalars
/// convert to their printed text; containers to their debug form; absence
/// to `"null"`.
#[must_use]
pub fn to_str(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Str(s)) => Value::Str(s.clone()),
        Some(Value::Bool(b)) => Value::str(b.to_string()),
        Some(Value::Int(n)) => Value::str(n.to_string()),
        Some(Value::Float(x)) => Value::str(format_float(*x)),
        Some(other) => Value::str(other.to_string()),
        None => Value::str("null"),
    }
}

/// `(type x)`
#[must_use]
pub fn type_of(value: Option<&Value>) -> Value {
    Value::str(value.map_or("null", Value::type_name))
}
