//! Loose boolean interpretation of JSON values.

use serde_json::Value;

/// Interprets a JSON value as a boolean the way dashboards and scripts expect.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are false; everything else is true.
/// Note that the string `"false"` is true: it is a non-empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
