//! Fuzz target for path-expression parsing and resolution.
//!
//! Field paths come from operator-edited schema files; parsing and resolving
//! any string must return a value or absence, never panic.

#![no_main]

use ar_config::PathExpr;
use ar_report::resolve::resolve_expr;
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &str| {
    let record = json!({
        "vitalsMap": {"vitals": {"heart_rate": 72}},
        "exercises": [{"id": 235, "setList": [{"time": 45}]}, {"id": "x"}],
        "list": [1, [2, 3], null]
    });

    if let Ok(expr) = PathExpr::parse(data) {
        let _ = resolve_expr(&record, &expr);
        // Display round trip must parse to the same steps
        let reparsed = PathExpr::parse(&expr.to_string()).expect("display output parses");
        assert_eq!(reparsed.steps(), expr.steps());
    }
});
