//! Normalization of untyped values into strings

use serde_json::Value;

/// Convert an arbitrary value into the string a field validator sees
///
/// Strings pass through, numbers and booleans use their canonical text and
/// anything structured is serialized as compact JSON.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// Like [`normalize`] but only for scalars; nested structures yield `None`
pub fn normalize_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(normalize(value)),
        _ => None,
    }
}
