//! Fuzz target for assembling arbitrary records against the built-in schemas.

#![no_main]

use ar_config::SchemaRegistry;
use ar_report::assemble;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let registry = SchemaRegistry::builtin();
    for (_, schema) in registry.iter() {
        let first = assemble(&record, schema);
        let second = assemble(&record, schema);
        assert_eq!(first, second);
    }
});
