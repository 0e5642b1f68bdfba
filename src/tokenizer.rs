// ABOUTME: Lexical analyzer turning program text into a token sequence

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, one_of},
    combinator::{opt, recognize, value},
    multi::many0,
    IResult, Parser,
};

use crate::error::EvalError;
use crate::value::Value;

/// Characters that may begin a symbol.
const INITIAL_SYMBOL_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!$%*/:<=>?~_^&";

fn is_initial_symbol_char(c: char) -> bool {
    INITIAL_SYMBOL_CHARS.contains(c)
}

fn is_subsequent_symbol_char(c: char) -> bool {
    c == '+' || c == '-' || c == '.' || c.is_ascii_digit() || is_initial_symbol_char(c)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Characters that may immediately follow an atom. Anything else glued to
/// the end of a number or symbol is a lexical error.
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\n' | '(' | ')' | '"' | '\'')
}

fn delimited(rest: &str) -> bool {
    rest.chars().next().map_or(true, is_delimiter)
}

/// Skip whitespace (space, newline) and `;` comments.
fn atmosphere(input: &str) -> IResult<&str, ()> {
    many0(alt((
        value((), take_while1(|c: char| c == ' ' || c == '\n')),
        value((), (char(';'), take_while(|c: char| c != '\n'))),
    )))
    .map(|_| ())
    .parse(input)
}

fn number_run(input: &str) -> IResult<&str, &str> {
    recognize((opt(one_of("+-")), take_while1(is_number_char))).parse(input)
}

fn symbol_run(input: &str) -> IResult<&str, &str> {
    recognize((
        one_of(INITIAL_SYMBOL_CHARS),
        take_while(is_subsequent_symbol_char),
    ))
    .parse(input)
}

/// Reads the whole program text and returns its token sequence.
pub fn tokenize(source: &str) -> Result<Vec<Value>, EvalError> {
    let mut tokens = Vec::new();
    let mut rest = source;
    loop {
        let (after, _) = atmosphere(rest).unwrap_or((rest, ()));
        rest = after;
        let Some(first) = rest.chars().next() else {
            break;
        };
        let (after_token, token) = next_token(rest, first)?;
        tokens.push(token);
        rest = after_token;
    }
    Ok(tokens)
}

fn next_token(input: &str, first: char) -> Result<(&str, Value), EvalError> {
    match first {
        '(' => Ok((&input[1..], Value::Open)),
        ')' => Ok((&input[1..], Value::Close)),
        '\'' => Ok((&input[1..], Value::Quote)),
        '"' => lex_string(input),
        '#' => lex_boolean(input),
        '+' | '-' => lex_signed(input, first),
        c if is_number_char(c) => lex_number(input),
        c if is_initial_symbol_char(c) => lex_symbol(input),
        c => Err(EvalError::Lexical(format!(
            "'{}' is not a valid character",
            c
        ))),
    }
}

/// Strings keep both quotes in the payload; no escape sequences, and a
/// newline before the closing quote is as fatal as end of input.
fn lex_string(input: &str) -> Result<(&str, Value), EvalError> {
    let body = &input[1..];
    let (rest, content) =
        take_while::<_, _, nom::error::Error<&str>>(|c: char| c != '"' && c != '\n')(body)
            .unwrap_or((body, ""));
    match rest.chars().next() {
        Some('"') => Ok((&rest[1..], Value::Str(format!("\"{}\"", content)))),
        _ => Err(EvalError::Lexical("unterminated string".to_string())),
    }
}

/// Only `#t` and `#f` may begin with `#`.
fn lex_boolean(input: &str) -> Result<(&str, Value), EvalError> {
    let mut chars = input.chars();
    chars.next();
    let flag = chars.next();
    let rest = chars.as_str();
    let token = match flag {
        Some('t') => Value::Bool(true),
        Some('f') => Value::Bool(false),
        _ => {
            return Err(EvalError::Lexical(
                "cannot start a symbol with #".to_string(),
            ))
        }
    };
    if !delimited(rest) {
        return Err(EvalError::Lexical(
            "cannot start a symbol with #".to_string(),
        ));
    }
    Ok((rest, token))
}

/// A sign begins a number when a digit or `.` follows; a sign followed by a
/// delimiter is the bare `+`/`-` symbol; anything else is an error.
fn lex_signed(input: &str, sign: char) -> Result<(&str, Value), EvalError> {
    let after_sign = &input[1..];
    match after_sign.chars().next() {
        Some(c) if is_number_char(c) => lex_number(input),
        Some(c) if !is_delimiter(c) => Err(EvalError::Lexical(format!(
            "cannot start a symbol with a {}",
            sign
        ))),
        _ => Ok((after_sign, Value::Symbol(sign.to_string()))),
    }
}

fn lex_number(input: &str) -> Result<(&str, Value), EvalError> {
    let (rest, lexeme) = match number_run(input) {
        Ok(parsed) => parsed,
        Err(_) => return Err(EvalError::Lexical("malformed number".to_string())),
    };
    let digits = lexeme.trim_start_matches(['+', '-']);
    if digits == "." {
        return Err(EvalError::Lexical("'.' is not a valid token".to_string()));
    }
    let dots = digits.matches('.').count();
    if dots > 1 {
        return Err(EvalError::Lexical(
            "a number cannot have 2 decimal points in it".to_string(),
        ));
    }
    if let Some(c) = rest.chars().next() {
        if !is_delimiter(c) {
            return Err(EvalError::Lexical(format!("'{}' is not a number", c)));
        }
    }
    let token = if dots == 0 {
        match lexeme.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => return Err(EvalError::Lexical(format!("'{}' is not a number", lexeme))),
        }
    } else {
        match lexeme.parse::<f64>() {
            Ok(d) => Value::Double(d),
            Err(_) => return Err(EvalError::Lexical(format!("'{}' is not a number", lexeme))),
        }
    };
    Ok((rest, token))
}

fn lex_symbol(input: &str) -> Result<(&str, Value), EvalError> {
    let (rest, lexeme) = match symbol_run(input) {
        Ok(parsed) => parsed,
        Err(_) => return Err(EvalError::Lexical("malformed symbol".to_string())),
    };
    if let Some(c) = rest.chars().next() {
        if !is_delimiter(c) {
            return Err(EvalError::Lexical(format!(
                "'{}' is not a valid character",
                c
            )));
        }
    }
    Ok((rest, Value::Symbol(lexeme.to_string())))
}
