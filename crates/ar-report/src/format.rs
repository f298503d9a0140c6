//! Formatter table for multi-path fields.
//!
//! Schemas name a formatter by [`FormatterId`]; [`formatter`] maps the id to
//! its implementation. Formatters receive one display value per configured
//! path (absent entries as `None`) and return `None` when they cannot render,
//! which omits the field.

use ar_config::FormatterId;

/// A named formatting strategy.
pub trait Formatter: Send + Sync {
    /// Id this implementation is registered under.
    fn id(&self) -> FormatterId;

    /// Combine per-path display values into one display string.
    fn format(&self, values: &[Option<String>]) -> Option<String>;
}

/// `"{systolic}/{diastolic} mmHg"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BloodPressureFormatter;

impl Formatter for BloodPressureFormatter {
    fn id(&self) -> FormatterId {
        FormatterId::BloodPressure
    }

    fn format(&self, values: &[Option<String>]) -> Option<String> {
        let (sys, dia) = pair(values)?;
        Some(format!("{}/{} mmHg", sys, dia))
    }
}

/// `"{a}/{b}"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioFormatter;

impl Formatter for RatioFormatter {
    fn id(&self) -> FormatterId {
        FormatterId::Ratio
    }

    fn format(&self, values: &[Option<String>]) -> Option<String> {
        let (a, b) = pair(values)?;
        Some(format!("{}/{}", a, b))
    }
}

/// Present values joined with `", "`; `None` when nothing is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinFormatter;

impl Formatter for JoinFormatter {
    fn id(&self) -> FormatterId {
        FormatterId::Join
    }

    fn format(&self, values: &[Option<String>]) -> Option<String> {
        let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
        if present.is_empty() {
            None
        } else {
            Some(present.join(", "))
        }
    }
}

fn pair(values: &[Option<String>]) -> Option<(&str, &str)> {
    match values {
        [Some(a), Some(b)] => Some((a.as_str(), b.as_str())),
        _ => None,
    }
}

static BLOOD_PRESSURE: BloodPressureFormatter = BloodPressureFormatter;
static RATIO: RatioFormatter = RatioFormatter;
static JOIN: JoinFormatter = JoinFormatter;

/// Look up the implementation for a formatter id.
pub fn formatter(id: FormatterId) -> &'static dyn Formatter {
    match id {
        FormatterId::BloodPressure => &BLOOD_PRESSURE,
        FormatterId::Ratio => &RATIO,
        FormatterId::Join => &JOIN,
    }
}

/// Formatter used for multi-path fields without an explicit `format`.
pub fn default_formatter() -> &'static dyn Formatter {
    formatter(FormatterId::Join)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_table_is_consistent() {
        for id in FormatterId::ALL {
            assert_eq!(formatter(id).id(), id);
        }
        assert_eq!(default_formatter().id(), FormatterId::Join);
    }

    #[test]
    fn test_blood_pressure() {
        let f = formatter(FormatterId::BloodPressure);
        assert_eq!(f.format(&some(&["120", "80"])), Some("120/80 mmHg".to_string()));
        assert_eq!(f.format(&[Some("120".to_string()), None]), None);
        assert_eq!(f.format(&some(&["120"])), None);
    }

    #[test]
    fn test_ratio() {
        let f = formatter(FormatterId::Ratio);
        assert_eq!(f.format(&some(&["31", "29.5"])), Some("31/29.5".to_string()));
        assert_eq!(f.format(&[None, None]), None);
    }

    #[test]
    fn test_join_skips_absent() {
        let f = formatter(FormatterId::Join);
        assert_eq!(
            f.format(&[Some("a".to_string()), None, Some("c".to_string())]),
            Some("a, c".to_string())
        );
        assert_eq!(f.format(&[None, None]), None);
        assert_eq!(f.format(&some(&["", "0"])), Some(", 0".to_string()));
    }
}
