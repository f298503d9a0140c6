//! Path resolution against a record.
//!
//! Resolution borrows the record and never allocates copies of it. A step
//! that cannot be applied (missing key, index out of range, no matching
//! element, or a non-container value with steps remaining) makes the whole
//! expression absent.

use ar_config::{CompareOp, FieldPath, PathExpr, Predicate, Step};
use serde_json::Value;
use tracing::debug;

/// Result of resolving a [`FieldPath`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Value of a single expression.
    Single(Option<&'a Value>),
    /// Per-expression values, absent entries kept in place.
    Multi(Vec<Option<&'a Value>>),
}

impl<'a> Resolution<'a> {
    /// Values as a slice-like list regardless of shape.
    pub fn values(&self) -> Vec<Option<&'a Value>> {
        match self {
            Resolution::Single(v) => vec![*v],
            Resolution::Multi(vs) => vs.clone(),
        }
    }
}

/// Resolve a field path.
pub fn resolve<'a>(record: &'a Value, path: &FieldPath) -> Resolution<'a> {
    match path {
        FieldPath::Single(expr) => Resolution::Single(resolve_str(record, expr)),
        FieldPath::Multi(exprs) => {
            Resolution::Multi(exprs.iter().map(|e| resolve_str(record, e)).collect())
        }
    }
}

/// Parse and resolve one expression. Malformed expressions resolve to `None`.
pub fn resolve_str<'a>(record: &'a Value, expr: &str) -> Option<&'a Value> {
    match PathExpr::parse(expr) {
        Ok(parsed) => resolve_expr(record, &parsed),
        Err(e) => {
            debug!(path = expr, error = %e, "Malformed path expression");
            None
        }
    }
}

/// Resolve a parsed expression.
pub fn resolve_expr<'a>(record: &'a Value, expr: &PathExpr) -> Option<&'a Value> {
    expr.steps()
        .iter()
        .try_fold(record, |current, step| apply_step(current, step))
}

fn apply_step<'a>(current: &'a Value, step: &Step) -> Option<&'a Value> {
    match step {
        Step::Key(key) => match current {
            Value::Object(map) => map.get(key),
            // `list.0` addresses an element the same way `list[0]` does.
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        },
        Step::Index(idx) => current.as_array()?.get(*idx),
        Step::Filter(predicate) => current
            .as_array()?
            .iter()
            .find(|item| predicate_matches(item, predicate)),
    }
}

fn predicate_matches(item: &Value, predicate: &Predicate) -> bool {
    let Some(value) = item.as_object().and_then(|m| m.get(&predicate.field)) else {
        return false;
    };

    match predicate.op {
        CompareOp::Eq => number_equals(value, predicate.literal),
    }
}

fn number_equals(value: &Value, literal: i64) -> bool {
    let Value::Number(n) = value else {
        return false;
    };
    if let Some(i) = n.as_i64() {
        return i == literal;
    }
    if let Some(u) = n.as_u64() {
        return literal >= 0 && u == literal as u64;
    }
    // Only whole floats inside the i64 range can equal an integer literal.
    n.as_f64().is_some_and(|f| {
        f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 && f as i64 == literal
    })
}
