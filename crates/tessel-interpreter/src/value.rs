//! Runtime values.
//!
//! Scalars (`Bool`, `Int`, `Float`) are carried by value. Strings and
//! tuples are immutable and shared through [`Rc`]; lists and tables are
//! shared *and* mutable through `Rc<RefCell<..>>`, so two variables holding
//! the same list see each other's `push`/`setitem`.
//!
//! The absence of a value ("null") is not a variant: it is `Option::None`
//! wherever a value may be missing, including list elements and table
//! values.
//!
//! Ownership is plain reference counting. A list that ends up containing
//! itself (directly or through other containers) is never freed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A runtime value. `None` in an `Option<Value>` is "null".
#[derive(Debug, Clone)]
pub enum Value {
    /// `true` / `false`
    Bool(bool),

    /// 64-bit signed integer with wrapping arithmetic
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// Immutable UTF-8 string
    Str(Rc<str>),

    /// Fixed-length sequence
    Tuple(Rc<[Option<Value>]>),

    /// Growable sequence, shared and mutable
    List(Rc<RefCell<Vec<Option<Value>>>>),

    /// String-keyed map, shared and mutable
    Table(Rc<RefCell<Table>>),
}

impl Value {
    /// Creates a string value.
    pub fn str(text: impl Into<Rc<str>>) -> Self {
        Self::Str(text.into())
    }

    /// Creates a list value owning `items`.
    #[must_use]
    pub fn list(items: Vec<Option<Value>>) -> Self {
        Self::List(Rc::new(RefCell::new(items)))
    }

    /// Creates a table value.
    #[must_use]
    pub fn table(table: Table) -> Self {
        Self::Table(Rc::new(RefCell::new(table)))
    }

    /// Creates a tuple value.
    #[must_use]
    pub fn tuple(items: Vec<Option<Value>>) -> Self {
        Self::Tuple(items.into())
    }

    /// Name reported by the `type` builtin.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Table(_) => "table",
        }
    }

    /// Truthiness: zero, empty and `false` are falsy; everything else is
    /// truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Tuple(items) => !items.is_empty(),
            Self::List(items) => !items.borrow().is_empty(),
            Self::Table(table) => !table.borrow().is_empty(),
        }
    }

    /// Number of owners of the underlying allocation.
    ///
    /// Scalars are copied rather than shared and always report 1.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        match self {
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => 1,
            Self::Str(s) => Rc::strong_count(s),
            Self::Tuple(items) => Rc::strong_count(items),
            Self::List(items) => Rc::strong_count(items),
            Self::Table(table) => Rc::strong_count(table),
        }
    }

    /// Returns `true` if both handles point at the same allocation.
    #[must_use]
    pub fn same_object(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Rc::ptr_eq(a, b),
            (Self::Tuple(a), Self::Tuple(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Table(a), Self::Table(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Truthiness of a possibly absent value. Absence is falsy.
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_truthy)
}

/// Insertion-ordered string-keyed map with linear lookup.
#[derive(Debug, Clone, Default)]
pub struct Table {
    keys: Vec<Rc<str>>,
    values: Vec<Option<Value>>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| &**k == key)
    }

    /// Looks up `key`. The outer `None` means "no such key".
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Option<Value>> {
        self.position(key).map(|idx| &self.values[idx])
    }

    /// Inserts or replaces, keeping the original insertion position.
    pub fn set(&mut self, key: Rc<str>, value: Option<Value>) {
        match self.position(&key) {
            Some(idx) => self.values[idx] = value,
            None => {
                self.keys.push(key);
                self.values.push(value);
            }
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Option<Value>> {
        let idx = self.position(key)?;
        self.keys.remove(idx);
        Some(self.values.remove(idx))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.keys
            .iter()
            .map(|k| &**k)
            .zip(self.values.iter().map(Option::as_ref))
    }
}

/// Formats a float the way `print` and `str` show it.
///
/// Shortest round-trip digits; plain notation for decimal exponents from -4
/// to 16, scientific otherwise (`1e+20`, `1e-05`).
#[must_use]
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..=16).contains(&exp) {
        format!("{x}")
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

fn write_seq(f: &mut fmt::Formatter<'_>, tag: &str, items: &[Option<Value>]) -> fmt::Result {
    write!(f, "({tag}")?;
    for item in items {
        write!(f, " {}", Repr(item.as_ref()))?;
    }
    f.write_str(")")
}

/// The canonical debug form, as written by `print` for non-strings.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::Str(s) => write_escaped(f, s),
            Self::Tuple(items) => write_seq(f, "tuple", items),
            Self::List(items) => write_seq(f, "list", &items.borrow()),
            Self::Table(table) => {
                f.write_str("{")?;
                for (key, value) in table.borrow().iter() {
                    write!(f, "{key}: {}, ", Repr(value))?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Debug form of a possibly absent value; absence shows as `null`.
#[derive(Debug, Clone, Copy)]
pub struct Repr<'a>(pub Option<&'a Value>);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("null"),
        }
    }
}
