//! Report assembly: schema + record → ordered resolved fields.

use crate::classify::classify;
use crate::format::{default_formatter, formatter};
use crate::resolve::{resolve, Resolution};
use crate::value::display_value;
use ar_config::{FieldSpec, ReportSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// A field ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    pub label: String,
    /// Display value without the unit.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

impl ResolvedField {
    /// Value with its unit suffix, e.g. `"72 bpm"`.
    pub fn rendered(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {}", self.value, unit),
            None => self.value.clone(),
        }
    }
}

/// One section of an assembled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledSection {
    pub name: String,
    pub fields: Vec<ResolvedField>,
}

/// Ordered output of the assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledReport {
    pub sections: Vec<AssembledSection>,
}

impl AssembledReport {
    /// Total rendered fields.
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Find a field by section name and label.
    pub fn field(&self, section: &str, label: &str) -> Option<&ResolvedField> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .fields
            .iter()
            .find(|f| f.label == label)
    }
}

/// Assemble a report. Never fails: unresolvable fields are omitted.
pub fn assemble(record: &Value, schema: &ReportSchema) -> AssembledReport {
    let mut omitted = 0usize;

    let sections: Vec<AssembledSection> = schema
        .sections
        .iter()
        .map(|section| {
            let fields = section
                .fields
                .iter()
                .filter_map(|field| {
                    let resolved = assemble_field(record, field);
                    if resolved.is_none() {
                        omitted += 1;
                        debug!(section = %section.name, label = %field.label, "Field absent; omitted");
                    }
                    resolved
                })
                .collect();
            AssembledSection {
                name: section.name.clone(),
                fields,
            }
        })
        .collect();

    let report = AssembledReport { sections };
    info!(
        sections = report.sections.len(),
        fields = report.field_count(),
        omitted,
        "Report assembled"
    );
    report
}

/// Resolve, format and classify one field. `None` means the field is absent.
pub fn assemble_field(record: &Value, field: &FieldSpec) -> Option<ResolvedField> {
    let (value, unit) = match resolve(record, &field.path) {
        Resolution::Single(v) => {
            let v = v?;
            let unit = match v {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => field.unit.clone(),
                _ => None,
            };
            (display_value(v)?, unit)
        }
        Resolution::Multi(values) => {
            let displays: Vec<Option<String>> = values
                .into_iter()
                .map(|v| v.and_then(display_value))
                .collect();
            let strategy = field.format.map_or_else(default_formatter, formatter);
            (strategy.format(&displays)?, None)
        }
    };

    let classification = field
        .classification
        .as_deref()
        .and_then(|rules| classify(&value, rules));

    Some(ResolvedField {
        label: field.label.clone(),
        value,
        unit,
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_config::{ClassificationRule, FormatterId, SectionSpec};
    use serde_json::json;

    fn section(name: &str, fields: Vec<FieldSpec>) -> SectionSpec {
        SectionSpec {
            name: name.to_string(),
            fields,
        }
    }

    #[test]
    fn test_single_with_unit() {
        let record = json!({"v": {"hr": 72}});
        let field = assemble_field(&record, &FieldSpec::new("Heart Rate", "v.hr").with_unit("bpm"))
            .unwrap();
        assert_eq!(field.value, "72");
        assert_eq!(field.rendered(), "72 bpm");
        assert!(field.classification.is_none());
    }

    #[test]
    fn test_multi_ignores_unit() {
        let record = json!({"a": 1, "b": 2});
        let spec = FieldSpec::multi("Pair", ["a", "b"])
            .with_format(FormatterId::Ratio)
            .with_unit("cm");
        let field = assemble_field(&record, &spec).unwrap();
        assert_eq!(field.rendered(), "1/2");
        assert!(field.unit.is_none());
    }

    #[test]
    fn test_unit_only_on_scalars() {
        let record = json!({"grip": {"x": 1}, "sets": [1, 2], "ok": true});
        let object = assemble_field(&record, &FieldSpec::new("Grip", "grip").with_unit("kg")).unwrap();
        assert!(object.unit.is_none());
        assert!(!object.rendered().ends_with(" kg"));

        let array = assemble_field(&record, &FieldSpec::new("Sets", "sets").with_unit("kg")).unwrap();
        assert!(array.unit.is_none());

        let flag = assemble_field(&record, &FieldSpec::new("Ok", "ok").with_unit("x")).unwrap();
        assert_eq!(flag.rendered(), "true x");
    }

    #[test]
    fn test_null_is_absent() {
        let record = json!({"v": null});
        assert!(assemble_field(&record, &FieldSpec::new("V", "v")).is_none());
    }

    #[test]
    fn test_zero_and_empty_present() {
        let record = json!({"zero": 0, "empty": ""});
        let zero = assemble_field(&record, &FieldSpec::new("Zero", "zero").with_unit("bpm")).unwrap();
        assert_eq!(zero.rendered(), "0 bpm");
        let empty = assemble_field(&record, &FieldSpec::new("Empty", "empty")).unwrap();
        assert_eq!(empty.value, "");
    }

    #[test]
    fn test_multi_without_format_partial() {
        let record = json!({"a": "x", "c": "z"});
        let field = assemble_field(&record, &FieldSpec::multi("Tags", ["a", "b", "c"])).unwrap();
        assert_eq!(field.value, "x, z");

        assert!(assemble_field(&record, &FieldSpec::multi("None", ["p", "q"])).is_none());
    }

    #[test]
    fn test_formatter_declines_partial() {
        let record = json!({"bp_sys": 120});
        let spec = FieldSpec::multi("BP", ["bp_sys", "bp_dia"]).with_format(FormatterId::BloodPressure);
        assert!(assemble_field(&record, &spec).is_none());
    }

    #[test]
    fn test_classification_from_display_value() {
        let rules = vec![ClassificationRule::new(0.0, 18.5, "Underweight")];
        let record = json!({"bmi": "17.0", "label": "n/a"});
        let bmi = assemble_field(
            &record,
            &FieldSpec::new("BMI", "bmi").with_classification(rules.clone()),
        )
        .unwrap();
        assert_eq!(bmi.classification.as_deref(), Some("Underweight"));

        let text = assemble_field(&record, &FieldSpec::new("L", "label").with_classification(rules))
            .unwrap();
        assert!(text.classification.is_none());
        assert_eq!(text.value, "n/a");
    }

    #[test]
    fn test_order_and_empty_sections_kept() {
        let record = json!({"a": 1, "b": 2, "c": 3});
        let schema = ReportSchema {
            sections: vec![
                section(
                    "First",
                    vec![FieldSpec::new("C", "c"), FieldSpec::new("A", "a")],
                ),
                section("Empty", vec![FieldSpec::new("Missing", "zz")]),
                section("Last", vec![FieldSpec::new("B", "b")]),
            ],
        };
        let report = assemble(&record, &schema);
        let names: Vec<_> = report.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Empty", "Last"]);
        let labels: Vec<_> = report.sections[0].fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "A"]);
        assert!(report.sections[1].fields.is_empty());
        assert_eq!(report.field_count(), 3);
        assert_eq!(report.field("Last", "B").map(|f| f.value.as_str()), Some("2"));
    }
}
