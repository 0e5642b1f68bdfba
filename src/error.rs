// ABOUTME: Error taxonomy for lexical, syntax, and evaluation failures

use crate::value::Value;
use thiserror::Error;

// ===== Arity constant strings (eliminates allocations in error paths) =====
pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";

/// Every way the interpreter can fail. Errors are non-recoverable: the
/// driver prints the diagnostic on one line and exits with `exit_code`.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Tokenizer failure: bad number, bad symbol start, stray `#`,
    /// unterminated string, invalid character.
    #[error("{0}")]
    Lexical(String),

    /// Unmatched parentheses or a dangling quote.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Wrong argument count or shape for a special form.
    #[error("'{form}' {message}")]
    BadFormShape {
        form: &'static str,
        message: &'static str,
    },

    /// `let`/`define`/`set!` target is not a symbol.
    #[error("'{form}' can only assign expressions to symbols")]
    BadFormBinding { form: &'static str },

    #[error("the first argument of 'lambda' must be a list of parameter symbols")]
    BadLambdaParams,

    #[error("Undefined symbol: {0}")]
    UnboundSymbol(String),

    #[error("value in function position is not applicable")]
    NotApplicable,

    #[error("not enough arguments provided")]
    TooFewArgs,

    #[error("too many arguments provided")]
    TooManyArgs,

    /// Primitive arity violation.
    #[error("{function}: expected {expected} argument{}, got {actual}", if *.expected == "1" { "" } else { "s" })]
    Arity {
        function: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// Primitive received an argument of the wrong kind.
    #[error("{function} {message}, got {actual}")]
    WrongType {
        function: &'static str,
        message: &'static str,
        actual: &'static str,
    },

    #[error("division by zero")]
    DivideByZero,
}

impl EvalError {
    /// Create a special-form shape error.
    pub fn bad_form(form: &'static str, message: &'static str) -> Self {
        EvalError::BadFormShape { form, message }
    }

    /// Create an arity error with expected and actual counts.
    pub fn arity(function: &'static str, expected: &'static str, actual: usize) -> Self {
        EvalError::Arity {
            function,
            expected,
            actual,
        }
    }

    /// Create a type error naming the offending value's kind.
    pub fn wrong_type(function: &'static str, message: &'static str, actual: &Value) -> Self {
        EvalError::WrongType {
            function,
            message,
            actual: actual.type_name(),
        }
    }

    /// Process status the driver exits with after printing the diagnostic.
    pub fn exit_code(&self) -> i32 {
        match self {
            EvalError::Lexical(_) => 1,
            EvalError::Syntax(_) => 2,
            EvalError::BadFormShape { .. } => 3,
            EvalError::BadFormBinding { .. } => 4,
            EvalError::BadLambdaParams => 5,
            EvalError::UnboundSymbol(_) => 6,
            EvalError::NotApplicable => 7,
            EvalError::TooFewArgs | EvalError::TooManyArgs | EvalError::Arity { .. } => 8,
            EvalError::WrongType { .. } => 9,
            EvalError::DivideByZero => 10,
        }
    }
}
