//! Range classification of resolved values.

use crate::value::parse_number;
use ar_config::ClassificationRule;

/// Status used when a numeric value matches no range.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Classify a display value.
///
/// Returns `None` when the value does not parse as a finite number.
pub fn classify(display: &str, rules: &[ClassificationRule]) -> Option<String> {
    parse_number(display).map(|n| classify_number(n, rules).to_string())
}

/// First rule whose `[min, max)` contains `value`, else [`UNKNOWN_STATUS`].
pub fn classify_number(value: f64, rules: &[ClassificationRule]) -> &str {
    rules
        .iter()
        .find(|rule| rule.contains(value))
        .map(|rule| rule.status.as_str())
        .unwrap_or(UNKNOWN_STATUS)
}
