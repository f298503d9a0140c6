//! No-mock assembly tests over real fixture records and schema tables.
//!
//! Covers:
//! - Worked scenarios (blood pressure, BMI, filtered exercise, missing field)
//! - Field omission semantics for null, zero and empty values
//! - Idempotence and concurrent assembly over a shared registry
//! - Session-level errors through the report service

use ar_config::{FieldSpec, ReportSchema, SchemaRegistry, SectionSpec};
use ar_config::{ClassificationRule, FormatterId};
use ar_report::{
    assemble, HtmlRenderer, JsonRecordStore, RecordStore, ReportError, ReportService,
};
use serde_json::json;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test")
        .join("fixtures")
}

fn records() -> JsonRecordStore {
    JsonRecordStore::open(&fixtures_dir().join("records").join("sessions.json"))
        .expect("fixture records")
}

fn fixture_registry() -> SchemaRegistry {
    SchemaRegistry::from_file(&fixtures_dir().join("schemas").join("valid.json"))
        .expect("fixture schemas")
}

fn single_section(fields: Vec<FieldSpec>) -> ReportSchema {
    ReportSchema {
        sections: vec![SectionSpec {
            name: "Main".to_string(),
            fields,
        }],
    }
}

fn bmi_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new(0.0, 18.5, "Underweight"),
        ClassificationRule::new(18.5, 25.0, "Normal"),
        ClassificationRule::new(25.0, 30.0, "Overweight"),
        ClassificationRule::new(30.0, 100.0, "Obese"),
    ]
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn blood_pressure_formatter_combines_two_paths() {
    let record = json!({"vitalsMap": {"vitals": {"bp_sys": 120, "bp_dia": 80}}});
    let schema = single_section(vec![FieldSpec::multi(
        "Blood Pressure",
        ["vitalsMap.vitals.bp_sys", "vitalsMap.vitals.bp_dia"],
    )
    .with_format(FormatterId::BloodPressure)]);

    let report = assemble(&record, &schema);
    let field = report.field("Main", "Blood Pressure").unwrap();
    assert_eq!(field.rendered(), "120/80 mmHg");
    assert!(field.classification.is_none());
}

#[test]
fn bmi_classified_underweight() {
    let record = json!({"bodyCompositionData": {"BMI": 17}});
    let schema = single_section(vec![
        FieldSpec::new("BMI", "bodyCompositionData.BMI").with_classification(bmi_rules())
    ]);

    let report = assemble(&record, &schema);
    let field = report.field("Main", "BMI").unwrap();
    assert_eq!(field.value, "17");
    assert_eq!(field.classification.as_deref(), Some("Underweight"));
}

#[test]
fn filtered_exercise_then_index() {
    let record = json!({"exercises": [{"id": 100}, {"id": 235, "setList": [{"time": 45}]}]});
    let schema = single_section(vec![FieldSpec::new(
        "Cardiovascular Endurance",
        "exercises[?id==235].setList[0].time",
    )
    .with_unit("seconds")]);

    let report = assemble(&record, &schema);
    assert_eq!(
        report
            .field("Main", "Cardiovascular Endurance")
            .map(|f| f.rendered()),
        Some("45 seconds".to_string())
    );
}

#[test]
fn missing_field_omitted_siblings_render() {
    let record = json!({"a": 1, "c": 3});
    let schema = single_section(vec![
        FieldSpec::new("A", "a"),
        FieldSpec::new("B", "b.deeper"),
        FieldSpec::new("C", "c"),
    ]);

    let report = assemble(&record, &schema);
    let labels: Vec<_> = report.sections[0]
        .fields
        .iter()
        .map(|f| f.label.as_str())
        .collect();
    assert_eq!(labels, vec!["A", "C"]);
}

// ============================================================================
// Omission semantics
// ============================================================================

#[test]
fn zero_and_empty_string_are_rendered_null_is_not() {
    let record = json!({"zero": 0, "empty": "", "nothing": null});
    let schema = single_section(vec![
        FieldSpec::new("Zero", "zero").with_unit("bpm"),
        FieldSpec::new("Empty", "empty"),
        FieldSpec::new("Nothing", "nothing"),
    ]);

    let report = assemble(&record, &schema);
    assert_eq!(report.field_count(), 2);
    assert_eq!(report.field("Main", "Zero").unwrap().rendered(), "0 bpm");
    assert_eq!(report.field("Main", "Empty").unwrap().value, "");
    assert!(report.field("Main", "Nothing").is_none());
}

#[test]
fn malformed_path_only_drops_its_field() {
    let record = json!({"exercises": [{"id": 235, "t": 1}], "ok": "yes"});
    let schema = single_section(vec![
        FieldSpec::new("Broken", "exercises[?id>235].t"),
        FieldSpec::new("Fine", "ok"),
    ]);

    let report = assemble(&record, &schema);
    assert!(report.field("Main", "Broken").is_none());
    assert_eq!(report.field("Main", "Fine").unwrap().value, "yes");
}

// ============================================================================
// Fixture sessions
// ============================================================================

#[test]
fn builtin_heart_rate_assessment() {
    let store = records();
    let schemas = SchemaRegistry::builtin();
    let service = ReportService::new(&store, &schemas);

    let prepared = service.prepare("session_001").unwrap();
    let report = &prepared.report;
    assert_eq!(prepared.meta.assessment_type, "as_hr_02");

    let value = |section: &str, label: &str| report.field(section, label).map(|f| f.rendered());
    assert_eq!(value("Key Body Vitals", "Heart Rate").as_deref(), Some("72 bpm"));
    assert_eq!(
        value("Key Body Vitals", "Blood Pressure").as_deref(),
        Some("120/80 mmHg")
    );
    assert_eq!(value("Key Body Vitals", "Oxygen Saturation").as_deref(), Some("98 %"));
    assert_eq!(value("Body Composition", "Waist-to-Hip Ratio").as_deref(), Some("0.82"));
    assert_eq!(value("Fitness Levels", "VO2 Max").as_deref(), Some("42.5"));
    assert_eq!(
        value("Fitness Levels", "Cardiovascular Endurance").as_deref(),
        Some("45 seconds")
    );
    assert_eq!(
        report
            .field("Body Composition", "BMI")
            .and_then(|f| f.classification.as_deref()),
        Some("Underweight")
    );
    assert_eq!(report.field_count(), prepared.schema.field_count());
}

#[test]
fn builtin_cardio_assessment_with_gaps() {
    let store = records();
    let schemas = SchemaRegistry::builtin();
    let service = ReportService::new(&store, &schemas);

    let report = service.prepare("session_002").unwrap().report;
    assert_eq!(
        report.field("Key Body Vitals", "Heart Rate").map(|f| f.rendered()),
        Some("0 bpm".to_string())
    );
    // Diastolic missing: formatter declines.
    assert!(report.field("Key Body Vitals", "Blood Pressure").is_none());
    assert!(report
        .field("Cardiovascular Endurance", "Mean Arterial Pressure")
        .is_none());
    assert_eq!(
        report.field("Body Composition", "BMI").map(|f| f.value.as_str()),
        Some("23.1")
    );
    assert_eq!(report.sections.len(), 3);
}

#[test]
fn fixture_grip_assessment() {
    let store = records();
    let schemas = fixture_registry();
    let service = ReportService::new(&store, &schemas);

    let report = service.prepare("session_005").unwrap().report;
    let value = |label: &str| {
        report
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.label == label)
            .cloned()
    };

    assert_eq!(value("Left / Right").unwrap().value, "31/29.5");
    assert_eq!(value("Attempts").unwrap().value, "28, 33");
    assert_eq!(value("Dominant Hand").unwrap().value, "right");
    let peak = value("Peak").unwrap();
    assert_eq!(peak.rendered(), "40 kg");
    assert_eq!(peak.classification.as_deref(), Some("High"));
    assert_eq!(value("Operator").unwrap().value, "");
    assert_eq!(value("Devices").unwrap().value, "Dyno-2");
}

#[test]
fn session_errors_are_distinct() {
    let store = records();
    let schemas = SchemaRegistry::builtin();
    let service = ReportService::new(&store, &schemas);

    let err = service.prepare("session_999").unwrap_err();
    assert!(matches!(err, ReportError::RecordNotFound { .. }));
    assert!(err.is_not_found());

    let err = service.prepare("session_003").unwrap_err();
    assert!(matches!(err, ReportError::SchemaNotFound { .. }));
    assert!(err.to_string().contains("as_unknown_99"));

    let err = service.prepare("session_004").unwrap_err();
    assert!(matches!(err, ReportError::MissingAssessmentType { .. }));
    assert!(!err.is_not_found());
}

// ============================================================================
// Purity
// ============================================================================

#[test]
fn assembly_is_idempotent_and_leaves_record_untouched() {
    let store = records();
    let schemas = SchemaRegistry::builtin();
    let record = store.lookup("session_001").unwrap();
    let before = record.clone();
    let schema = schemas.get("as_hr_02").unwrap();

    let first = assemble(record, schema);
    let second = assemble(record, schema);
    assert_eq!(first, second);
    assert_eq!(record, &before);
}

#[test]
fn concurrent_assembly_shares_registry() {
    let store = records();
    let schemas = SchemaRegistry::builtin();
    let service = ReportService::new(&store, &schemas);
    let expected = service.prepare("session_001").unwrap().report;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let schemas = &schemas;
                let store = &store;
                scope.spawn(move || {
                    let record = store.lookup("session_001").unwrap();
                    assemble(record, schemas.get("as_hr_02").unwrap())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn service_renders_html_for_fixture_session() {
    let store = records();
    let schemas = SchemaRegistry::builtin();
    let service = ReportService::new(&store, &schemas);

    let (meta, html) = service
        .render("session_001", &HtmlRenderer::default())
        .unwrap();
    assert_eq!(meta.session_id, "session_001");
    assert!(meta.file_name("html").starts_with("report_session_001_"));
    assert!(html.contains("120/80 mmHg"));
    assert!(html.contains("45 seconds"));
    assert!(html.contains("Underweight"));
}
