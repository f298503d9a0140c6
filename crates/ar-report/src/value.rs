//! Display conversion for record values.

use serde_json::{Number, Value};

/// Display string for a resolved value.
///
/// `null` counts as absent. Strings are used verbatim, numbers print without
/// a trailing `.0` when integral, and nested structures print as compact JSON.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(format_number(n)),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Parse a display string as a finite number.
pub fn parse_number(display: &str) -> Option<f64> {
    display
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
}
