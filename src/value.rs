// ABOUTME: Value types representing Scheme data, tokens, and callables

use crate::env::Frame;
use crate::error::EvalError;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Double(f64),
    /// String literal; the payload keeps the surrounding quotes so printing
    /// round-trips the source text.
    Str(String),
    Symbol(String),
    Bool(bool),
    /// The empty list `()`.
    Null,
    /// Cons cell. Proper lists are right-nested pairs ending in Null, but
    /// `cons` may build any tail.
    Pair(Rc<Value>, Rc<Value>),
    /// `(` marker, only alive between the tokenizer and the parser.
    Open,
    /// `)` marker, only alive between the tokenizer and the parser.
    Close,
    /// `'` sugar marker, only alive between the tokenizer and the parser.
    Quote,
    /// Result of side-effecting forms; the driver prints nothing for it.
    Void,
    Closure {
        params: Vec<String>,
        body: Rc<Value>,
        env: Rc<Frame>,
    },
    Primitive(fn(&Value) -> Result<Value, EvalError>),
}

impl Value {
    /// Short kind name used in diagnostics and the token dump.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Pair(..) => "pair",
            Value::Open => "open",
            Value::Close => "close",
            Value::Quote => "quote",
            Value::Void => "void",
            Value::Closure { .. } => "closure",
            Value::Primitive(_) => "primitive",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            // %f convention: six decimal places, trailing zeros kept
            Value::Double(d) => write!(f, "{:.6}", d),
            Value::Str(s) => write!(f, "{}", s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Null => write!(f, "()"),
            Value::Pair(head, tail) => {
                write!(f, "({}", head)?;
                let mut rest = tail.as_ref();
                loop {
                    match rest {
                        Value::Pair(head, tail) => {
                            write!(f, " {}", head)?;
                            rest = tail.as_ref();
                        }
                        Value::Null => break,
                        // improper tail, rendered inline
                        other => {
                            write!(f, " {}", other)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Open => write!(f, "("),
            Value::Close => write!(f, ")"),
            Value::Quote => write!(f, "'"),
            Value::Void => Ok(()),
            Value::Closure { .. } => write!(f, "closure"),
            Value::Primitive(_) => write!(f, "primitive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    #[test]
    fn test_integer_display() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Integer(-7)), "-7");
        assert_eq!(format!("{}", Value::Integer(0)), "0");
    }

    #[test]
    fn test_double_display_keeps_six_places() {
        assert_eq!(format!("{}", Value::Double(6.0)), "6.000000");
        assert_eq!(format!("{}", Value::Double(-2.5)), "-2.500000");
        assert_eq!(format!("{}", Value::Double(0.125)), "0.125000");
    }

    #[test]
    fn test_bool_display() {
        assert_eq!(format!("{}", Value::Bool(true)), "#t");
        assert_eq!(format!("{}", Value::Bool(false)), "#f");
    }

    #[test]
    fn test_string_display_keeps_quotes() {
        let s = Value::Str("\"hello\"".to_string());
        assert_eq!(format!("{}", s), "\"hello\"");
    }

    #[test]
    fn test_symbol_and_null_display() {
        assert_eq!(format!("{}", Value::Symbol("foo".to_string())), "foo");
        assert_eq!(format!("{}", Value::Null), "()");
    }

    #[test]
    fn test_list_display_with_nested_lists() {
        let simple = list::from_vec(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
        ]);
        assert_eq!(format!("{}", simple), "(1 2 3)");

        let nested = list::from_vec(vec![
            Value::Integer(1),
            list::from_vec(vec![Value::Integer(2), Value::Integer(3)]),
            Value::Integer(4),
        ]);
        assert_eq!(format!("{}", nested), "(1 (2 3) 4)");
    }

    #[test]
    fn test_improper_tail_renders_inline() {
        let pair = list::cons(Value::Integer(1), Value::Integer(2));
        assert_eq!(format!("{}", pair), "(1 2)");
    }

    #[test]
    fn test_closure_displays_as_literal() {
        let closure = Value::Closure {
            params: vec!["x".to_string()],
            body: Rc::new(Value::Symbol("x".to_string())),
            env: Frame::root(),
        };
        assert_eq!(format!("{}", closure), "closure");
    }

    #[test]
    fn test_void_displays_as_nothing() {
        assert_eq!(format!("{}", Value::Void), "");
    }

    #[test]
    fn test_token_markers_display() {
        assert_eq!(format!("{}", Value::Open), "(");
        assert_eq!(format!("{}", Value::Close), ")");
        assert_eq!(format!("{}", Value::Quote), "'");
    }
}
