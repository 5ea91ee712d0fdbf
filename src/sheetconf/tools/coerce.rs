//! Conversion of raw cell text into typed values.
//!
//! The default [`Coercion::Lenient`] policy never fails: malformed numbers
//! become zero and anything but `true` becomes `false`. Numbers are read from
//! the longest numeric prefix of the cell, so `"12abc"` yields `12`.
//! [`Coercion::Strict`] rejects numeric text that is not a complete literal.
//! Blank numeric cells are zero under both policies.

use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::model::{ArrayValue, ScalarValue, TypeToken, TypedValue};

/// Policy applied to malformed numeric text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coercion {
    #[default]
    Lenient,
    Strict,
}

/// Coerces `raw` according to `token` using the lenient policy.
pub fn coerce(token: &TypeToken, raw: &str) -> TypedValue {
    match token {
        TypeToken::Int => TypedValue::Scalar(ScalarValue::Int(lenient_int(raw))),
        TypeToken::Float => TypedValue::Scalar(ScalarValue::Float(lenient_float(raw))),
        TypeToken::Bool => TypedValue::Scalar(ScalarValue::Bool(parse_bool(raw))),
        TypeToken::String => TypedValue::Scalar(ScalarValue::String(raw.to_string())),
        TypeToken::IntArray => TypedValue::Array(ArrayValue::Ints(
            array_items(raw).into_iter().map(lenient_int).collect(),
        )),
        TypeToken::FloatArray => TypedValue::Array(ArrayValue::Floats(
            array_items(raw).into_iter().map(lenient_float).collect(),
        )),
        TypeToken::StringArray => TypedValue::Array(ArrayValue::Strings(
            array_items(raw).into_iter().map(str::to_string).collect(),
        )),
        TypeToken::Unknown(_) => TypedValue::Raw(raw.to_string()),
    }
}

/// Coerces `raw` with the given policy. `column` names the field in errors.
pub fn coerce_with(
    policy: Coercion,
    token: &TypeToken,
    raw: &str,
    column: &str,
) -> Result<TypedValue> {
    if policy == Coercion::Lenient {
        return Ok(coerce(token, raw));
    }

    let value = match token {
        TypeToken::Int => TypedValue::Scalar(ScalarValue::Int(strict_int(raw, column)?)),
        TypeToken::Float => TypedValue::Scalar(ScalarValue::Float(strict_float(raw, column)?)),
        TypeToken::IntArray => TypedValue::Array(ArrayValue::Ints(
            array_items(raw)
                .into_iter()
                .map(|item| strict_int(item, column))
                .collect::<Result<Vec<_>>>()?,
        )),
        TypeToken::FloatArray => TypedValue::Array(ArrayValue::Floats(
            array_items(raw)
                .into_iter()
                .map(|item| strict_float(item, column))
                .collect::<Result<Vec<_>>>()?,
        )),
        other => coerce(other, raw),
    };
    Ok(value)
}

fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Splits an array cell into its raw items. One leading `[` and one trailing
/// `]` are removed and items keep their surrounding whitespace; a cell with
/// nothing but whitespace between the brackets has no items.
fn array_items(raw: &str) -> Vec<&str> {
    let body = raw.strip_prefix('[').unwrap_or(raw);
    let body = body.strip_suffix(']').unwrap_or(body);
    if body.trim().is_empty() {
        return Vec::new();
    }
    body.split(',').collect()
}

fn lenient_int(raw: &str) -> i64 {
    int_prefix(raw).unwrap_or(0)
}

fn lenient_float(raw: &str) -> f64 {
    float_prefix(raw).unwrap_or(0.0)
}

fn strict_int(raw: &str, column: &str) -> Result<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>().map_err(|_| invalid(column, raw))
}

fn strict_float(raw: &str, column: &str) -> Result<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && is_numeric_literal(text) => Ok(value),
        _ => Err(invalid(column, raw)),
    }
}

fn invalid(column: &str, value: &str) -> ToolError {
    ToolError::InvalidLiteral {
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Reads an optionally signed run of digits after leading whitespace.
fn int_prefix(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

/// Reads the longest prefix that forms a finite decimal literal.
fn float_prefix(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let candidate_len = text
        .bytes()
        .take_while(|&byte| is_numeric_byte(byte))
        .count();
    (1..=candidate_len)
        .rev()
        .filter_map(|len| text[..len].parse::<f64>().ok())
        .find(|value| value.is_finite())
}

/// Rejects spellings such as `inf` or `NaN` that `f64::from_str` accepts.
fn is_numeric_literal(text: &str) -> bool {
    text.bytes().all(is_numeric_byte)
}

fn is_numeric_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
}
