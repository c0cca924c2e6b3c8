//! Value coercions shared by rule predicates and payload extraction.
//!
//! Every predicate in [`super::Check`] is defined in terms of these functions, so a
//! value that passes validation is guaranteed to extract to the same typed value.

use serde_json::Value;

/// Decimal string or JSON integer that fits in an `i32`.
pub fn as_integer(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// JSON number, or a string holding a finite decimal number.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// JSON bool, `"true"`/`"false"`/`"1"`/`"0"`, or the numbers `0` and `1`.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// String with at least one non-whitespace character.
pub fn as_non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

/// Anything other than `null` or the empty string.
pub fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Null) && value.as_str() != Some("")
}
