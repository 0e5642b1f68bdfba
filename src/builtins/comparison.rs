//! Comparison primitives: =, <, >, <=, >=
//!
//! Numeric comparisons over integers and doubles (mixed operands compare
//! as doubles); each takes exactly two arguments and returns a boolean.

use super::{number_operand, proper_args};
use crate::env::Frame;
use crate::error::{EvalError, ARITY_TWO};
use crate::value::Value;
use std::rc::Rc;

fn operands(function: &'static str, args: &Value) -> Result<(f64, f64), EvalError> {
    let items = proper_args(function, args)?;
    if items.len() != 2 {
        return Err(EvalError::arity(function, ARITY_TWO, items.len()));
    }
    Ok((
        number_operand(function, items[0])?,
        number_operand(function, items[1])?,
    ))
}

pub fn builtin_eq(args: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands("=", args)?;
    Ok(Value::Bool(a == b))
}

pub fn builtin_lt(args: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands("<", args)?;
    Ok(Value::Bool(a < b))
}

pub fn builtin_gt(args: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands(">", args)?;
    Ok(Value::Bool(a > b))
}

pub fn builtin_le(args: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands("<=", args)?;
    Ok(Value::Bool(a <= b))
}

pub fn builtin_ge(args: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands(">=", args)?;
    Ok(Value::Bool(a >= b))
}

/// Register all comparison primitives in the environment.
pub fn register(env: &Rc<Frame>) {
    env.define("=".to_string(), Value::Primitive(builtin_eq));
    env.define("<".to_string(), Value::Primitive(builtin_lt));
    env.define(">".to_string(), Value::Primitive(builtin_gt));
    env.define("<=".to_string(), Value::Primitive(builtin_le));
    env.define(">=".to_string(), Value::Primitive(builtin_ge));
}
