//! Typed value parsing

use crate::domain::{TypeTag, Value};
use thiserror::Error;

/// Transient parse failure. Never stored in a table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid type name")]
    InvalidTypeName,
    #[error("invalid syntax")]
    InvalidSyntax,
}

/// Parse `text` according to the type tag `type_name`.
///
/// `hex` and `octal` produce [`Value::Int`]; `boolean` produces [`Value::Bool`].
pub fn parse_value(type_name: &str, text: &str) -> Result<Value, ParseError> {
    let tag = TypeTag::from_name(type_name).ok_or(ParseError::InvalidTypeName)?;
    parse_tagged(tag, text)
}

pub fn parse_tagged(tag: TypeTag, text: &str) -> Result<Value, ParseError> {
    let value = match tag {
        TypeTag::Int => Value::Int(parse_integer(text, 10)?),
        TypeTag::Hex => Value::Int(parse_integer(text, 16)?),
        TypeTag::Octal => Value::Int(parse_integer(text, 8)?),
        TypeTag::Float => Value::Float(parse_float(text)?),
        TypeTag::Bool | TypeTag::Boolean => Value::Bool(parse_bool(text)?),
        TypeTag::Char => Value::Char(parse_char(text)?),
        TypeTag::String => Value::String(parse_string(text)?),
    };
    debug_assert_eq!(value.kind(), tag.kind());
    Ok(value)
}

/// Optional sign, then (for base 16) an optional `0x`, then digits to the end.
fn parse_integer(text: &str, radix: u32) -> Result<i64, ParseError> {
    let text = text.trim_start();
    let (negative, unsigned) = split_sign(text);
    let digits = if radix == 16 {
        unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned)
    } else {
        unsigned
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidSyntax);
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| ParseError::InvalidSyntax)?;
    if negative {
        0i64.checked_sub_unsigned(magnitude).ok_or(ParseError::InvalidSyntax)
    } else {
        i64::try_from(magnitude).map_err(|_| ParseError::InvalidSyntax)
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

fn parse_float(text: &str) -> Result<f64, ParseError> {
    let text = text.trim_start();
    let (_, unsigned) = split_sign(text);
    // Rust's float grammar also takes `inf`/`nan`; configuration files do not.
    let numeric = unsigned.chars().any(|c| c.is_ascii_digit())
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return Err(ParseError::InvalidSyntax);
    }
    let value = text.parse::<f64>().map_err(|_| ParseError::InvalidSyntax)?;
    // Out-of-range literals such as `1e400` parse to infinity.
    if !value.is_finite() {
        return Err(ParseError::InvalidSyntax);
    }
    Ok(value)
}

fn parse_bool(text: &str) -> Result<bool, ParseError> {
    match text {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::InvalidSyntax),
    }
}

/// `'c'`, an escaped `'\n'` / `'\r'` / `'\t'` / `'\\'` / `'\''`, or one bare char.
fn parse_char(text: &str) -> Result<char, ParseError> {
    if let Some(inner) = text.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        let mut chars = inner.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some('\\'), Some(escaped), None) => unescape_char(escaped),
            (Some(c), None, None) => Some(c),
            _ => None,
        };
        if let Some(c) = parsed {
            return Ok(c);
        }
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::InvalidSyntax),
    }
}

fn unescape_char(escaped: char) -> Option<char> {
    match escaped {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Quoted form first: everything after the opening quote up to the next quote
/// (or the end, if unterminated). Otherwise the raw text up to the first quote.
fn parse_string(text: &str) -> Result<String, ParseError> {
    if let Some(rest) = text.strip_prefix('"') {
        let body = rest.split('"').next().unwrap_or("");
        if !body.is_empty() || rest.starts_with('"') {
            return Ok(body.to_string());
        }
        return Err(ParseError::InvalidSyntax);
    }

    let body = text.split('"').next().unwrap_or("");
    if body.is_empty() {
        return Err(ParseError::InvalidSyntax);
    }
    Ok(body.to_string())
}
