//! Dot-path resolution into a runtime payload tree.
//!
//! A payload is an arbitrary JSON tree produced by upstream workflow nodes.
//! Condition fields, template variables, and loop/filter source keys all
//! address into it with the same dot-delimited path syntax.

use serde_json::Value;

/// Resolves a dot-delimited path against a payload tree.
///
/// Returns `None` when any segment fails to resolve. `None` is the "missing"
/// sentinel and is distinct from a present `Value::Null` or an empty string;
/// the emptiness operators treat all three as empty, but everything else
/// distinguishes them.
///
/// Numeric segments index into arrays, so `"items.0.name"` resolves the name
/// of the first item.
pub fn resolve<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let mut current = payload;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// The string form of a scalar value, used for string operators and template
/// interpolation. Null, arrays, and objects have no string form.
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric coercion: JSON numbers pass through, numeric strings parse.
pub(crate) fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
