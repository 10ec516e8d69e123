//! List, table and string access.
//!
//! Reads (`item`, `len`, `index`) answer unsupported operands with absence.
//! Writes (`setitem`, `push`, `remove`) on unsupported operands or
//! out-of-range positions do nothing.

use super::compare::equals;
use crate::value::Value;

fn position(key: Option<&Value>) -> Option<usize> {
    match key? {
        Value::Int(n) => usize::try_from(*n).ok(),
        _ => None,
    }
}

fn count(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// `(item COLL KEY)`
#[must_use]
pub fn get_item(coll: Option<&Value>, key: Option<&Value>) -> Option<Value> {
    match (coll?, key?) {
        (Value::Str(s), _) => {
            let c = s.chars().nth(position(key)?)?;
            Some(Value::str(c.to_string()))
        }
        (Value::List(items), _) => items.borrow().get(position(key)?).cloned().flatten(),
        (Value::Tuple(items), _) => items.get(position(key)?).cloned().flatten(),
        (Value::Table(table), Value::Str(k)) => table.borrow().get(k).cloned().flatten(),
        _ => None,
    }
}

/// `(len COLL)`: characters of a string, elements of a sequence, entries of
/// a table.
#[must_use]
pub fn length(coll: Option<&Value>) -> Option<Value> {
    Some(count(match coll? {
        Value::Str(s) => s.chars().count(),
        Value::Tuple(items) => items.len(),
        Value::List(items) => items.borrow().len(),
        Value::Table(table) => table.borrow().len(),
        _ => return None,
    }))
}

/// `(index COLL X)`: first position of `X`, absent when not found.
#[must_use]
pub fn index_of(coll: Option<&Value>, needle: Option<&Value>) -> Option<Value> {
    match (coll?, needle?) {
        (Value::List(items), _) => items
            .borrow()
            .iter()
            .position(|item| equals(item.as_ref(), needle))
            .map(count),
        (Value::Str(haystack), Value::Str(pat)) => {
            let byte = haystack.find(&**pat)?;
            Some(count(haystack[..byte].chars().count()))
        }
        _ => None,
    }
}

/// `(setitem COLL KEY VALUE)`
pub fn set_item(coll: Option<&Value>, key: Option<&Value>, value: Option<Value>) {
    match (coll, key) {
        (Some(Value::List(items)), _) => {
            let Some(idx) = position(key) else { return };
            let previous = items
                .borrow_mut()
                .get_mut(idx)
                .map(|slot| std::mem::replace(slot, value));
            drop(previous);
        }
        (Some(Value::Table(table)), Some(Value::Str(k))) => {
            table.borrow_mut().set(k.clone(), value);
        }
        _ => {}
    }
}

/// `(push LIST VALUE)`
pub fn push(list: Option<&Value>, value: Option<Value>) {
    if let Some(Value::List(items)) = list {
        items.borrow_mut().push(value);
    }
}

/// `(remove COLL KEY)`: deletes a list element by position or a table entry
/// by key.
pub fn remove(coll: Option<&Value>, key: Option<&Value>) {
    match (coll, key) {
        (Some(Value::List(items)), _) => {
            let Some(idx) = position(key) else { return };
            let mut items = items.borrow_mut();
            if idx < items.len() {
                items.remove(idx);
            }
        }
        (Some(Value::Table(table)), Some(Value::Str(k))) => {
            table.borrow_mut().remove(k);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Table;

    fn ints(values: &[i64]) -> Value {
        Value::list(values.iter().map(|n| Some(Value::Int(*n))).collect())
    }

    #[test]
    fn test_get_item() {
        let list = ints(&[10, 20, 30]);
        assert!(matches!(get_item(Some(&list), Some(&Value::Int(1))), Some(Value::Int(20))));
        assert!(get_item(Some(&list), Some(&Value::Int(3))).is_none());
        assert!(get_item(Some(&list), Some(&Value::Int(-1))).is_none());
        assert!(get_item(Some(&list), Some(&Value::str("0"))).is_none());

        let text = Value::str("héllo");
        let c = get_item(Some(&text), Some(&Value::Int(1))).unwrap();
        assert!(matches!(c, Value::Str(s) if &*s == "é"));

        let mut table = Table::new();
        table.set("k".into(), Some(Value::Int(5)));
        let table = Value::table(table);
        assert!(matches!(get_item(Some(&table), Some(&Value::str("k"))), Some(Value::Int(5))));
        assert!(get_item(Some(&table), Some(&Value::str("z"))).is_none());
        assert!(get_item(Some(&table), Some(&Value::Int(0))).is_none());
    }

    #[test]
    fn test_get_item_shares_element() {
        let inner = ints(&[1]);
        let outer = Value::list(vec![Some(inner.clone())]);
        let read = get_item(Some(&outer), Some(&Value::Int(0))).unwrap();
        assert!(read.same_object(&inner));
        assert_eq!(inner.ref_count(), 3);
    }

    #[test]
    fn test_length() {
        assert!(matches!(length(Some(&Value::str("héllo"))), Some(Value::Int(5))));
        assert!(matches!(length(Some(&ints(&[1, 2]))), Some(Value::Int(2))));
        assert!(matches!(length(Some(&Value::table(Table::new()))), Some(Value::Int(0))));
        assert!(length(Some(&Value::Int(3))).is_none());
        assert!(length(None).is_none());
    }

    #[test]
    fn test_index_of() {
        let list = ints(&[4, 5, 4]);
        assert!(matches!(index_of(Some(&list), Some(&Value::Int(4))), Some(Value::Int(0))));
        assert!(matches!(index_of(Some(&list), Some(&Value::Int(5))), Some(Value::Int(1))));
        assert!(index_of(Some(&list), Some(&Value::Int(9))).is_none());

        let text = Value::str("añbc");
        assert!(matches!(index_of(Some(&text), Some(&Value::str("bc"))), Some(Value::Int(2))));
        assert!(index_of(Some(&text), Some(&Value::str("x"))).is_none());
    }

    #[test]
    fn test_set_item_and_push() {
        let list = ints(&[1, 2]);
        set_item(Some(&list), Some(&Value::Int(0)), Some(Value::str("a")));
        set_item(Some(&list), Some(&Value::Int(5)), Some(Value::Int(0)));
        push(Some(&list), None);
        assert_eq!(list.to_string(), "(list \"a\" 2 null)");

        let table = Value::table(Table::new());
        set_item(Some(&table), Some(&Value::str("x")), Some(Value::Int(1)));
        set_item(Some(&table), Some(&Value::str("x")), Some(Value::Int(2)));
        set_item(Some(&table), Some(&Value::Int(0)), Some(Value::Int(3)));
        assert_eq!(table.to_string(), "{x: 2, }");
    }

    #[test]
    fn test_set_item_releases_replaced_value() {
        let shared = ints(&[]);
        let list = Value::list(vec![Some(shared.clone())]);
        assert_eq!(shared.ref_count(), 2);
        set_item(Some(&list), Some(&Value::Int(0)), None);
        assert_eq!(shared.ref_count(), 1);
    }

    #[test]
    fn test_remove() {
        let list = ints(&[1, 2, 3]);
        remove(Some(&list), Some(&Value::Int(1)));
        remove(Some(&list), Some(&Value::Int(7)));
        assert_eq!(list.to_string(), "(list 1 3)");

        let mut table = Table::new();
        table.set("a".into(), Some(Value::Int(1)));
        table.set("b".into(), Some(Value::Int(2)));
        let table = Value::table(table);
        remove(Some(&table), Some(&Value::str("a")));
        assert_eq!(table.to_string(), "{b: 2, }");
    }
}
