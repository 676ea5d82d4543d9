//! Business-record graph traversal
//!
//! Records are plain `serde_json::Value` graphs supplied by the caller;
//! nothing here enforces a schema. Unknown paths resolve to `None` and the
//! callers turn that into empty/zero values.

use serde_json::Value;

/// Resolve a dot-separated path against a record
///
/// Segments name object attributes; a segment that parses as an index steps
/// into an array. Examples:
/// - `customer.name`
/// - `items.0.total`
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let mut current = record;
    for segment in path.split('.') {
        current = match segment.parse::<usize>() {
            Ok(index) => current.get(index)?,
            Err(_) => current.get(segment)?,
        };
    }

    Some(current)
}

/// Convert a JSON value to its display string
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Coerce a JSON value to a number, treating anything non-numeric as absent
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
