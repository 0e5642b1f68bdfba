//! List primitives: cons, car, cdr, null?
//!
//! `cons` may build improper pairs; `car` and `cdr` demand a pair.

use super::proper_args;
use crate::env::Frame;
use crate::error::{EvalError, ARITY_ONE, ARITY_TWO};
use crate::list;
use crate::value::Value;
use std::rc::Rc;

/// Builds a pair from exactly two values. The tail need not be a list.
pub fn builtin_cons(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("cons", args)?;
    if items.len() != 2 {
        return Err(EvalError::arity("cons", ARITY_TWO, items.len()));
    }
    Ok(list::cons(items[0].clone(), items[1].clone()))
}

/// Head of a pair.
pub fn builtin_car(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("car", args)?;
    if items.len() != 1 {
        return Err(EvalError::arity("car", ARITY_ONE, items.len()));
    }
    match list::car(items[0]) {
        Some(head) => Ok(head.clone()),
        None => Err(EvalError::wrong_type(
            "car",
            "requires a list as an argument",
            items[0],
        )),
    }
}

/// Tail of a pair.
pub fn builtin_cdr(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("cdr", args)?;
    if items.len() != 1 {
        return Err(EvalError::arity("cdr", ARITY_ONE, items.len()));
    }
    match list::cdr(items[0]) {
        Some(tail) => Ok(tail.clone()),
        None => Err(EvalError::wrong_type(
            "cdr",
            "requires a list as an argument",
            items[0],
        )),
    }
}

/// True iff the argument is the empty list.
pub fn builtin_is_null(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("null?", args)?;
    if items.len() != 1 {
        return Err(EvalError::arity("null?", ARITY_ONE, items.len()));
    }
    Ok(Value::Bool(matches!(items[0], Value::Null)))
}

/// Register all list primitives in the environment.
pub fn register(env: &Rc<Frame>) {
    env.define("cons".to_string(), Value::Primitive(builtin_cons));
    env.define("car".to_string(), Value::Primitive(builtin_car));
    env.define("cdr".to_string(), Value::Primitive(builtin_cdr));
    env.define("null?".to_string(), Value::Primitive(builtin_is_null));
}
