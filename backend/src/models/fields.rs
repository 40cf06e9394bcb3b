//! Lenient field access over raw API records.
//!
//! Records arrive as loosely typed JSON objects: a field may be missing, null,
//! a number, or a number serialized as a string (Postgres `NUMERIC` columns are
//! rendered that way by the backend). These helpers never fail; they return
//! `None` and let callers apply the defaulting rule of their component.

use serde_json::{Map, Value};

/// A raw API record: field name to scalar value.
pub type Record = Map<String, Value>;

/// Sentinel key for records whose grouping field is missing or empty.
pub const UNKNOWN_KEY: &str = "unknown";

/// Read `field` as a finite number.
///
/// Accepts JSON numbers and strings holding a number. Booleans, objects,
/// arrays, null, NaN and infinities yield `None`.
pub fn number(record: &Record, field: &str) -> Option<f64> {
    let parsed = match record.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Read `field` as a number, treating anything unusable as 0.
pub fn number_or_zero(record: &Record, field: &str) -> f64 {
    number(record, field).unwrap_or(0.0)
}

/// Read `field` as display text.
///
/// Strings are trimmed; numbers and booleans are stringified so that numeric
/// codes (sizes, zone numbers) still group. Empty strings count as missing.
pub fn text(record: &Record, field: &str) -> Option<String> {
    let raw = match record.get(field)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

/// Read `field` as a grouping key, falling back to [`UNKNOWN_KEY`].
pub fn key(record: &Record, field: &str) -> String {
    text(record, field).unwrap_or_else(|| UNKNOWN_KEY.to_string())
}

/// First usable number among several candidate spellings of a field.
pub fn first_number(record: &Record, fields: &[&str]) -> Option<f64> {
    fields.iter().find_map(|f| number(record, f))
}

/// First usable text among several candidate spellings of a field.
pub fn first_text(record: &Record, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|f| text(record, f))
}
