//! Arithmetic primitives: +, -, *, /, modulo, zero?
//!
//! `+`, `-`, `*`, and `/` widen uniformly to double, even when every
//! operand is an integer; `modulo` stays in integers.

use super::{integer_operand, number_operand, proper_args};
use crate::env::Frame;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE, ARITY_ONE, ARITY_TWO};
use crate::value::Value;
use std::rc::Rc;

/// Sum of all arguments; the empty sum is 0.
pub fn builtin_add(args: &Value) -> Result<Value, EvalError> {
    let mut sum = 0.0;
    for item in proper_args("+", args)? {
        sum += number_operand("+", item)?;
    }
    Ok(Value::Double(sum))
}

/// Subtracts subsequent arguments from the first; with one argument,
/// returns its negation.
pub fn builtin_sub(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("-", args)?;
    if items.is_empty() {
        return Err(EvalError::arity("-", ARITY_AT_LEAST_ONE, 0));
    }
    let first = number_operand("-", items[0])?;
    if items.len() == 1 {
        return Ok(Value::Double(-first));
    }
    let mut result = first;
    for item in &items[1..] {
        result -= number_operand("-", item)?;
    }
    Ok(Value::Double(result))
}

/// Product of all arguments; the empty product is 1.
pub fn builtin_mul(args: &Value) -> Result<Value, EvalError> {
    let mut product = 1.0;
    for item in proper_args("*", args)? {
        product *= number_operand("*", item)?;
    }
    Ok(Value::Double(product))
}

/// Division of exactly two numbers.
pub fn builtin_div(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("/", args)?;
    if items.len() != 2 {
        return Err(EvalError::arity("/", ARITY_TWO, items.len()));
    }
    let dividend = number_operand("/", items[0])?;
    let divisor = number_operand("/", items[1])?;
    if divisor == 0.0 {
        return Err(EvalError::DivideByZero);
    }
    Ok(Value::Double(dividend / divisor))
}

/// Integer remainder of exactly two integers.
pub fn builtin_modulo(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("modulo", args)?;
    if items.len() != 2 {
        return Err(EvalError::arity("modulo", ARITY_TWO, items.len()));
    }
    let a = integer_operand("modulo", items[0])?;
    let b = integer_operand("modulo", items[1])?;
    if b == 0 {
        return Err(EvalError::DivideByZero);
    }
    Ok(Value::Integer(a % b))
}

/// Numeric zero test.
pub fn builtin_is_zero(args: &Value) -> Result<Value, EvalError> {
    let items = proper_args("zero?", args)?;
    if items.len() != 1 {
        return Err(EvalError::arity("zero?", ARITY_ONE, items.len()));
    }
    Ok(Value::Bool(number_operand("zero?", items[0])? == 0.0))
}

/// Register all arithmetic primitives in the environment.
pub fn register(env: &Rc<Frame>) {
    env.define("+".to_string(), Value::Primitive(builtin_add));
    env.define("-".to_string(), Value::Primitive(builtin_sub));
    env.define("*".to_string(), Value::Primitive(builtin_mul));
    env.define("/".to_string(), Value::Primitive(builtin_div));
    env.define("modulo".to_string(), Value::Primitive(builtin_modulo));
    env.define("zero?".to_string(), Value::Primitive(builtin_is_zero));
}
