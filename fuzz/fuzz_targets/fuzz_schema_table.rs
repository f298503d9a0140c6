//! Fuzz target for schema table parsing.
//!
//! Tests that schema table parsing and validation handle arbitrary input
//! without panicking, and that any table that parses can be assembled.

#![no_main]

use ar_config::SchemaRegistry;
use ar_report::assemble;
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(registry) = SchemaRegistry::from_str(text) else {
        return;
    };

    let _ = registry.problems();
    let record = json!({"a": {"b": [0, 1.5, "x"]}, "id": 1});
    for (_, schema) in registry.iter() {
        let _ = assemble(&record, schema);
    }
});
