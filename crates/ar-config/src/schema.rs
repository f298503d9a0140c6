//! Report schema types.
//!
//! A schema is pure data: field paths are strings in the path grammar
//! (see [`crate::path`]), formatters are named by [`FormatterId`], and
//! classification rules are plain ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sections of a report for one assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSchema {
    pub sections: Vec<SectionSpec>,
}

impl ReportSchema {
    /// Total number of configured fields across all sections.
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

/// A named, ordered group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// One field of a report section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Display label.
    pub label: String,

    /// Where to read the value from.
    pub path: FieldPath,

    /// Unit suffix for single-path fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Formatter for multi-path fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatterId>,

    /// Ordered range classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Vec<ClassificationRule>>,
}

impl FieldSpec {
    /// Create a single-path field.
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: FieldPath::Single(path.into()),
            unit: None,
            format: None,
            classification: None,
        }
    }

    /// Create a multi-path field.
    pub fn multi<I, S>(label: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            path: FieldPath::Multi(paths.into_iter().map(Into::into).collect()),
            unit: None,
            format: None,
            classification: None,
        }
    }

    /// Set the unit suffix.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the formatter.
    pub fn with_format(mut self, format: FormatterId) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the classification rules.
    pub fn with_classification(mut self, rules: Vec<ClassificationRule>) -> Self {
        self.classification = Some(rules);
        self
    }
}

/// A single path expression or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldPath {
    Single(String),
    Multi(Vec<String>),
}

impl FieldPath {
    /// All path expressions, in order.
    pub fn expressions(&self) -> Vec<&str> {
        match self {
            FieldPath::Single(p) => vec![p.as_str()],
            FieldPath::Multi(ps) => ps.iter().map(String::as_str).collect(),
        }
    }

    /// Whether this is a list of paths.
    pub fn is_multi(&self) -> bool {
        matches!(self, FieldPath::Multi(_))
    }
}

/// Named formatter strategies for multi-path fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterId {
    /// `"{systolic}/{diastolic} mmHg"`.
    BloodPressure,
    /// `"{a}/{b}"`.
    Ratio,
    /// Present values joined with `", "`.
    Join,
}

impl FormatterId {
    /// All formatter ids.
    pub const ALL: [FormatterId; 3] = [
        FormatterId::BloodPressure,
        FormatterId::Ratio,
        FormatterId::Join,
    ];

    /// Stable string id used in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterId::BloodPressure => "blood_pressure",
            FormatterId::Ratio => "ratio",
            FormatterId::Join => "join",
        }
    }

    /// Number of values the formatter expects, if fixed.
    pub fn arity(&self) -> Option<usize> {
        match self {
            FormatterId::BloodPressure | FormatterId::Ratio => Some(2),
            FormatterId::Join => None,
        }
    }
}

impl fmt::Display for FormatterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a numeric range onto a status label.
///
/// Ranges are half-open: `min <= value < max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub range: [f64; 2],
    pub status: String,
}

impl ClassificationRule {
    pub fn new(min: f64, max: f64, status: impl Into<String>) -> Self {
        Self {
            range: [min, max],
            status: status.into(),
        }
    }

    pub fn min(&self) -> f64 {
        self.range[0]
    }

    pub fn max(&self) -> f64 {
        self.range[1]
    }

    /// Whether `value` falls in `[min, max)`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value < self.max()
    }
}
