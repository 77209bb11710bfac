//! Ready-made field parsers.
//!
//! Each function matches the [`FieldSpec::parse`](crate::FieldSpec::parse)
//! signature, so it can be attached directly:
//!
//! ```rust
//! use ingot::{parsers, FieldSpec};
//!
//! let age = FieldSpec::new("age").parse(parsers::as_i64);
//! ```
//!
//! The coercions accept both native JSON scalars and their string
//! spellings, which is what tabular sources produce (every CSV cell is
//! a string).

use crate::error::BoxError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ISO_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(.\d+)?(Z|[+-]\d{2}:\d{2})?$").unwrap()
});

static ISO_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()
});

/// Coerce a number or numeric string to an integer.
pub fn as_i64(raw: Value) -> Result<Value, BoxError> {
    match &raw {
        Value::Number(n) if n.is_i64() => Ok(raw),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => Ok(Value::from(n)),
            Err(e) => Err(format!("expected an integer, got '{s}': {e}").into()),
        },
        other => Err(format!("expected an integer, got {other}").into()),
    }
}

/// Coerce a number or numeric string to a float.
pub fn as_f64(raw: Value) -> Result<Value, BoxError> {
    match &raw {
        Value::Number(n) => match n.as_f64() {
            Some(f) => Ok(Value::from(f)),
            None => Err(format!("number {n} does not fit in an f64").into()),
        },
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Ok(Value::from(f)),
            Err(e) => Err(format!("expected a float, got '{s}': {e}").into()),
        },
        other => Err(format!("expected a float, got {other}").into()),
    }
}

/// Coerce a bool or bool-ish string (`true/false`, `t/f`, `1/0`,
/// `yes/no`, `y/n`, case-insensitive).
pub fn as_bool(raw: Value) -> Result<Value, BoxError> {
    match &raw {
        Value::Bool(_) => Ok(raw),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(Value::Bool(true)),
            "false" | "f" | "0" | "no" | "n" => Ok(Value::Bool(false)),
            _ => Err(format!("expected a bool, got '{s}'").into()),
        },
        other => Err(format!("expected a bool, got {other}").into()),
    }
}

/// Render any scalar as its string form; objects and arrays are
/// rejected.
pub fn as_string(raw: Value) -> Result<Value, BoxError> {
    match raw {
        Value::String(_) => Ok(raw),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::Null => Ok(Value::String(String::new())),
        other => Err(format!("expected a scalar, got {other}").into()),
    }
}

/// Validate an ISO-8601 calendar date (`YYYY-MM-DD`) and pass it
/// through unchanged.
pub fn iso_date(raw: Value) -> Result<Value, BoxError> {
    validate(raw, &ISO_DATE_REGEX, "an ISO date")
}

/// Validate an ISO-8601 date-time and pass it through unchanged.
pub fn iso_datetime(raw: Value) -> Result<Value, BoxError> {
    validate(raw, &ISO_DATETIME_REGEX, "an ISO date-time")
}

fn validate(raw: Value, pattern: &Regex, what: &str) -> Result<Value, BoxError> {
    match &raw {
        Value::String(s) if pattern.is_match(s) => Ok(raw),
        other => Err(format!("expected {what}, got {other}").into()),
    }
}
