//! Value primitives shared by the component catalog and the engine.
//!
//! Everything here is a pure function over `serde_json::Value`. Nothing
//! panics on malformed input; unusable values resolve to `null` or `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;

pub(crate) static NULL: Value = Value::Null;

// ─── resolve_field ──────────────────────────────────────────────────────────

/// Resolves a simple dot-path against an object.
///
/// Returns `None` if any segment fails to resolve. Empty path returns the
/// object itself. Only object keys are traversed; arrays are not indexed.
pub fn resolve_field<'a>(path: &str, object: &'a Value) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(object);
    }

    let mut current = object;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// True for a missing value or an explicit `null`.
pub fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// True for `null`, the empty string, and numeric zero.
///
/// Zero is deliberately blank: a required numeric field holding `0` fails.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Length of a string (in chars) or an array (in elements).
pub fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

// ─── comparisons ────────────────────────────────────────────────────────────

/// Orders two values for bound checks.
///
/// Two strings compare lexicographically. Otherwise both sides are read as
/// numbers (numeric strings are accepted, so raw form input like `"15"`
/// compares against `18`). Anything else is incomparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Value::String(a), Value::String(b)) = (a, b) {
        return Some(a.cmp(b));
    }
    let a = as_number(a)?;
    let b = as_number(b)?;
    a.partial_cmp(&b)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Deep equality.
///
/// Integer 42 equals float 42.0; object key order is irrelevant;
/// arrays compare element-wise by position and length. No coercion
/// between strings and numbers.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => a == b,
        },
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() {
                return false;
            }
            a.iter()
                .all(|(k, v)| b.get(k).is_some_and(|bv| values_equal(v, bv)))
        }
        _ => false,
    }
}

// ─── dates ──────────────────────────────────────────────────────────────────

/// Parses a date or date-time string into UTC.
///
/// Accepted: RFC 3339 (`2024-01-31T10:00:00Z`, `2024-01-31T10:00:00+02:00`),
/// naive date-times (`2024-01-31T10:00:00`, `2024-01-31 10:00:00`, read as
/// UTC) and plain dates (`2024-01-31`, midnight UTC).
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Normalizes a field value to epoch milliseconds for date comparison.
///
/// Numbers are taken as already normalized. Strings are parsed with
/// [`parse_datetime`]. Anything unparsable becomes `null`.
pub fn parse_epoch_millis(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => parse_datetime(s)
            .map(|dt| Value::from(dt.timestamp_millis()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

// ─── display ────────────────────────────────────────────────────────────────

/// Renders a value for a message: strings unquoted, everything else as
/// compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
