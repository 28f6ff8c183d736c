#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

/// Small structured input so the fuzzer reaches the section validators
/// instead of stalling in the YAML parser.
#[derive(Arbitrary, Debug)]
struct Input {
    version: String,
    actions: Vec<(Option<String>, Option<String>, Option<i64>, Option<String>)>,
    required: Vec<String>,
    conflicts: Vec<String>,
}

fuzz_target!(|input: Input| {
    let actions: Vec<Value> = input
        .actions
        .into_iter()
        .map(|(name, kind, timeout, next)| {
            json!({
                "name": name,
                "type": kind,
                "command": "x",
                "timeout": timeout,
                "on_success": next,
            })
        })
        .collect();
    let value = json!({
        "bot": {"name": "FuzzBot", "version": input.version, "enabled": true,
                "description": "x", "category": "data"},
        "triggers": [{"type": "manual", "pattern": "go"}],
        "actions": actions,
        "dependencies": {"required": input.required, "conflicts": input.conflicts},
    });
    if let Ok(doc) = lotabot_config::Document::try_from(value) {
        let _ = lotabot_config::validate(&doc);
    }
});
