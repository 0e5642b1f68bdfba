// ABOUTME: Evaluator executing parsed forms against environment frames

use crate::env::Frame;
use crate::error::EvalError;
use crate::list;
use crate::value::Value;
use std::rc::Rc;

/// Evaluates one expression in the given environment.
///
/// Recursion rides the host stack: there is no tail-call optimization, and
/// deep user recursion will exhaust it.
pub fn eval(expr: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    match expr {
        // Self-evaluating values
        Value::Integer(_) | Value::Double(_) | Value::Str(_) | Value::Bool(_) | Value::Null => {
            Ok(expr.clone())
        }

        Value::Symbol(name) => env
            .lookup(name)
            .ok_or_else(|| EvalError::UnboundSymbol(name.clone())),

        Value::Pair(head, tail) => eval_combination(head, tail, env),

        _ => Err(EvalError::NotApplicable),
    }
}

/// A combination is either a special form, dispatched on its head symbol
/// with the argument tail unevaluated, or a function application.
fn eval_combination(head: &Value, tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    if let Value::Symbol(name) = head {
        match name.as_str() {
            "quote" => return eval_quote(tail),
            "if" => return eval_if(tail, env),
            "let" => return eval_let(tail, env),
            "let*" => return eval_let_star(tail, env),
            "letrec" => return eval_letrec(tail, env),
            "define" => return eval_define(tail, env),
            "set!" => return eval_set(tail, env),
            "lambda" => return eval_lambda(tail, env),
            "begin" => return eval_begin(tail, env),
            "cond" => return eval_cond(tail, env),
            "and" => return eval_and(tail, env),
            "or" => return eval_or(tail, env),
            _ => {}
        }
    } else if !matches!(head, Value::Pair(..)) {
        return Err(EvalError::NotApplicable);
    }

    let callable = eval(head, env)?;
    let args = eval_each(tail, env)?;
    apply(&callable, &args)
}

/// Evaluates an argument list strictly left to right, returning the results
/// as a proper list in the same order.
pub fn eval_each(args: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let mut evaluated = Value::Null;
    let mut cur = args;
    while let Value::Pair(head, tail) = cur {
        evaluated = list::cons(eval(head, env)?, evaluated);
        cur = tail.as_ref();
    }
    Ok(list::reverse(&evaluated))
}

/// Applies a closure or primitive to an already-evaluated argument list.
pub fn apply(callable: &Value, args: &Value) -> Result<Value, EvalError> {
    match callable {
        Value::Primitive(function) => function(args),
        Value::Closure { params, body, env } => {
            let frame = Frame::with_parent(env.clone());
            let mut cur = args;
            for param in params {
                match cur {
                    Value::Pair(head, tail) => {
                        frame.define(param.clone(), head.as_ref().clone());
                        cur = tail.as_ref();
                    }
                    _ => return Err(EvalError::TooFewArgs),
                }
            }
            if !matches!(cur, Value::Null) {
                return Err(EvalError::TooManyArgs);
            }
            eval(body, &frame)
        }
        _ => Err(EvalError::NotApplicable),
    }
}

/// Checks a form's argument tail for the exact expected count.
fn form_args<'a>(
    tail: &'a Value,
    form: &'static str,
    count: usize,
    message: &'static str,
) -> Result<Vec<&'a Value>, EvalError> {
    if list::length(tail) != Some(count) {
        return Err(EvalError::BadFormShape { form, message });
    }
    Ok(list::elements(tail).unwrap_or_default())
}

/// Splits one `(name value)` binding pair, checking the shape and the
/// symbol target.
fn binding_pair<'a>(
    binding: &'a Value,
    form: &'static str,
) -> Result<(&'a str, &'a Value), EvalError> {
    let items = list::elements(binding)
        .filter(|items| items.len() == 2)
        .ok_or(EvalError::BadFormShape {
            form,
            message: "requires a list of tuples as the first argument",
        })?;
    let name = list::symbol_name(items[0]).ok_or(EvalError::BadFormBinding { form })?;
    Ok((name, items[1]))
}

fn eval_quote(tail: &Value) -> Result<Value, EvalError> {
    let args = form_args(tail, "quote", 1, "requires one argument")?;
    Ok(args[0].clone())
}

fn eval_if(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "if", 3, "requires 3 arguments")?;
    let condition = eval(args[0], env)?;
    // Only an explicit #f selects the alternate; every other value, the
    // empty list included, selects the consequent.
    if matches!(condition, Value::Bool(false)) {
        eval(args[2], env)
    } else {
        eval(args[1], env)
    }
}

fn eval_let(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "let", 2, "requires 2 arguments")?;
    let bindings = list::elements(args[0]).ok_or(EvalError::BadFormShape {
        form: "let",
        message: "requires a list of tuples as the first argument",
    })?;
    let frame = Frame::with_parent(env.clone());
    for binding in bindings {
        let (name, value_expr) = binding_pair(binding, "let")?;
        // Bindings are independent: value expressions see only the outer
        // environment.
        let value = eval(value_expr, env)?;
        frame.define(name.to_string(), value);
    }
    eval(args[1], &frame)
}

fn eval_let_star(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "let*", 2, "requires 2 arguments")?;
    let bindings = list::elements(args[0]).ok_or(EvalError::BadFormShape {
        form: "let*",
        message: "requires a list of tuples as the first argument",
    })?;
    let frame = Frame::with_parent(env.clone());
    for binding in bindings {
        let (name, value_expr) = binding_pair(binding, "let*")?;
        // Each value expression sees the bindings before it.
        let value = eval(value_expr, &frame)?;
        frame.define(name.to_string(), value);
    }
    eval(args[1], &frame)
}

fn eval_letrec(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "letrec", 2, "requires 2 arguments")?;
    let bindings = list::elements(args[0]).ok_or(EvalError::BadFormShape {
        form: "letrec",
        message: "requires a list of tuples as the first argument",
    })?;
    let frame = Frame::with_parent(env.clone());
    // Install every name with a sentinel first so the value expressions can
    // refer to each other, then overwrite each binding in place.
    let mut pairs = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let (name, value_expr) = binding_pair(binding, "letrec")?;
        frame.define(name.to_string(), Value::Void);
        pairs.push((name, value_expr));
    }
    for (name, value_expr) in pairs {
        let value = eval(value_expr, &frame)?;
        frame.assign(name, value)?;
    }
    eval(args[1], &frame)
}

fn eval_define(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "define", 2, "requires two arguments")?;
    let name = list::symbol_name(args[0]).ok_or(EvalError::BadFormBinding { form: "define" })?;
    let value = eval(args[1], env)?;
    env.define(name.to_string(), value);
    Ok(Value::Void)
}

fn eval_set(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "set!", 2, "requires two arguments")?;
    let name = list::symbol_name(args[0]).ok_or(EvalError::BadFormBinding { form: "set!" })?;
    let value = eval(args[1], env)?;
    env.assign(name, value)?;
    Ok(Value::Void)
}

fn eval_lambda(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "lambda", 2, "requires two arguments")?;
    let params = param_names(args[0])?;
    Ok(Value::Closure {
        params,
        body: Rc::new(args[1].clone()),
        env: env.clone(),
    })
}

/// The parameter list must be `()` or a proper list of symbols.
fn param_names(params: &Value) -> Result<Vec<String>, EvalError> {
    let items = list::elements(params).ok_or(EvalError::BadLambdaParams)?;
    items
        .into_iter()
        .map(|item| {
            list::symbol_name(item)
                .map(str::to_string)
                .ok_or(EvalError::BadLambdaParams)
        })
        .collect()
}

fn eval_begin(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let items = list::elements(tail).ok_or(EvalError::BadFormShape {
        form: "begin",
        message: "requires a proper list of expressions",
    })?;
    let mut result = Value::Void;
    for item in items {
        result = eval(item, env)?;
    }
    Ok(result)
}

fn eval_cond(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let clauses = list::elements(tail).ok_or(EvalError::BadFormShape {
        form: "cond",
        message: "requires a list of two-element clauses",
    })?;
    for (index, clause) in clauses.iter().enumerate() {
        let items = list::elements(clause)
            .filter(|items| items.len() == 2)
            .ok_or(EvalError::BadFormShape {
                form: "cond",
                message: "requires a list of two-element clauses",
            })?;
        if matches!(items[0], Value::Symbol(name) if name == "else") {
            if index + 1 != clauses.len() {
                return Err(EvalError::bad_form(
                    "cond",
                    "accepts 'else' only in the final clause",
                ));
            }
            return eval(items[1], env);
        }
        // A clause matches only on an explicit #t.
        if matches!(eval(items[0], env)?, Value::Bool(true)) {
            return eval(items[1], env);
        }
    }
    Ok(Value::Void)
}

fn eval_and(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "and", 2, "requires two arguments")?;
    let first = boolean_operand("and", eval(args[0], env)?)?;
    if !first {
        // Short-circuit: the second argument is never evaluated.
        return Ok(Value::Bool(false));
    }
    let second = boolean_operand("and", eval(args[1], env)?)?;
    Ok(Value::Bool(second))
}

fn eval_or(tail: &Value, env: &Rc<Frame>) -> Result<Value, EvalError> {
    let args = form_args(tail, "or", 2, "requires two arguments")?;
    let first = boolean_operand("or", eval(args[0], env)?)?;
    if first {
        return Ok(Value::Bool(true));
    }
    let second = boolean_operand("or", eval(args[1], env)?)?;
    Ok(Value::Bool(second))
}

fn boolean_operand(form: &'static str, value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::wrong_type(
            form,
            "requires boolean operands",
            &other,
        )),
    }
}
