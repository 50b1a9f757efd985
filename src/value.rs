//! String coercion for loosely-typed JSON values.
//!
//! Route parameters and envelope error entries arrive as arbitrary JSON. Both
//! are rendered the way a page script would stringify them: integral numbers
//! without a fractional part, arrays joined by commas, objects as an opaque
//! placeholder, and `null` as the empty string.

use serde_json::Value;

const OBJECT_PLACEHOLDER: &str = "[object Object]";

/// Render a JSON value as a display string.
#[must_use]
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce_to_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => OBJECT_PLACEHOLDER.to_owned(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
