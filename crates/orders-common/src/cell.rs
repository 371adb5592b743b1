//! Cell-level conversions between polars `AnyValue`s and Rust values.
//!
//! Malformed values never error: they become `None` so aggregates can skip
//! them.

use polars::prelude::AnyValue;

/// Renders a cell as text. `Null` becomes an empty string.
pub fn cell_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    }
}

/// Reads a cell as a finite `f64`.
pub fn cell_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        AnyValue::String(s) => return parse_f64(s),
        AnyValue::StringOwned(s) => return parse_f64(&s),
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Reads a cell as an `i64`. Floats are accepted only when integral.
pub fn cell_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float64(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a decimal number, rejecting blanks, `NaN`, and infinities.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integer, rejecting blanks.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Formats a float without trailing zeros (`1.50` renders as `1.5`).
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
