// ABOUTME: Shift/reduce parser assembling tokens into top-level forms

use crate::error::EvalError;
use crate::list;
use crate::value::Value;

/// Pushes a completed form, folding any pending quote markers on top of the
/// stack into `(quote form)` wrappers.
fn shift(stack: &mut Vec<Value>, mut form: Value) {
    while matches!(stack.last(), Some(Value::Quote)) {
        stack.pop();
        form = list::cons(
            Value::Symbol("quote".to_string()),
            list::cons(form, Value::Null),
        );
    }
    stack.push(form);
}

/// Converts the token sequence into the list of top-level forms.
///
/// Open markers are shifted and counted; a Close pops values back to the
/// matching Open and pushes the assembled proper list. The parser is purely
/// structural and never looks at the first symbol of a list.
pub fn parse(tokens: &[Value]) -> Result<Vec<Value>, EvalError> {
    let mut stack: Vec<Value> = Vec::new();
    let mut depth: usize = 0;

    for token in tokens {
        match token {
            Value::Open => {
                stack.push(Value::Open);
                depth += 1;
            }
            Value::Close => {
                let mut items = Vec::new();
                loop {
                    match stack.pop() {
                        Some(Value::Open) => break,
                        Some(Value::Quote) => {
                            return Err(EvalError::Syntax(
                                "quote is missing an expression".to_string(),
                            ));
                        }
                        Some(item) => items.push(item),
                        None => {
                            return Err(EvalError::Syntax(
                                "too many close parentheses".to_string(),
                            ));
                        }
                    }
                }
                items.reverse();
                shift(&mut stack, list::from_vec(items));
                depth -= 1;
            }
            Value::Quote => stack.push(Value::Quote),
            token => shift(&mut stack, token.clone()),
        }
    }

    if depth != 0 {
        return Err(EvalError::Syntax(
            "not enough close parentheses".to_string(),
        ));
    }
    if stack.iter().any(|item| matches!(item, Value::Quote)) {
        return Err(EvalError::Syntax(
            "quote is missing an expression".to_string(),
        ));
    }
    Ok(stack)
}
