// ABOUTME: Cons-cell accessors and proper-list utilities

use crate::value::Value;
use std::rc::Rc;

/// Builds a pair. The tail need not be a list.
pub fn cons(head: Value, tail: Value) -> Value {
    Value::Pair(Rc::new(head), Rc::new(tail))
}

/// Head of a pair.
pub fn car(value: &Value) -> Option<&Value> {
    match value {
        Value::Pair(head, _) => Some(head.as_ref()),
        _ => None,
    }
}

/// Tail of a pair.
pub fn cdr(value: &Value) -> Option<&Value> {
    match value {
        Value::Pair(_, tail) => Some(tail.as_ref()),
        _ => None,
    }
}

/// Number of elements in a proper list; `None` if the chain does not end
/// in `()`.
pub fn length(list: &Value) -> Option<usize> {
    let mut len = 0;
    let mut cur = list;
    loop {
        match cur {
            Value::Pair(_, tail) => {
                len += 1;
                cur = tail.as_ref();
            }
            Value::Null => return Some(len),
            _ => return None,
        }
    }
}

/// Borrowed elements of a proper list; `None` if the list is improper.
pub fn elements(list: &Value) -> Option<Vec<&Value>> {
    let mut items = Vec::new();
    let mut cur = list;
    loop {
        match cur {
            Value::Pair(head, tail) => {
                items.push(head.as_ref());
                cur = tail.as_ref();
            }
            Value::Null => return Some(items),
            _ => return None,
        }
    }
}

/// Builds a proper list holding the items in order.
pub fn from_vec(items: Vec<Value>) -> Value {
    let mut list = Value::Null;
    for item in items.into_iter().rev() {
        list = cons(item, list);
    }
    list
}

/// Reverses the pair spine of a list. Callers only reverse lists they
/// built, so an improper terminating atom is simply dropped.
pub fn reverse(list: &Value) -> Value {
    let mut out = Value::Null;
    let mut cur = list;
    while let Value::Pair(head, tail) = cur {
        out = cons(head.as_ref().clone(), out);
        cur = tail.as_ref();
    }
    out
}

/// Name of a symbol value.
pub fn symbol_name(value: &Value) -> Option<&str> {
    match value {
        Value::Symbol(name) => Some(name),
        _ => None,
    }
}
