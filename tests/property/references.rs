use std::collections::HashSet;

use lotabot_config::error::FindingCategory;
use lotabot_config::types::Document;
use lotabot_config::validate::validate;
use proptest::prelude::*;
use serde_json::{Value, json};

fn doc_with_actions(actions: Vec<Value>) -> Document {
    Document::try_from(json!({
        "bot": {
            "name": "FlowBot",
            "version": "1.2.3",
            "enabled": true,
            "description": "x",
            "category": "operations"
        },
        "triggers": [{"type": "manual", "pattern": "go"}],
        "actions": actions
    }))
    .unwrap()
}

const NAMES: [&str; 4] = ["fetch", "build", "ship", "notify"];
const TARGETS: [&str; 6] = ["fetch", "build", "ship", "notify", "ghost", "void"];

fn arb_actions() -> impl Strategy<Value = Vec<(usize, Option<usize>, Option<usize>)>> {
    prop::collection::vec(
        (
            0..NAMES.len(),
            prop::option::of(0..TARGETS.len()),
            prop::option::of(0..TARGETS.len()),
        ),
        1..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn one_reference_error_per_dangling_edge(layout in arb_actions()) {
        let names: HashSet<&str> = layout.iter().map(|(n, _, _)| NAMES[*n]).collect();
        let mut expected = 0;
        let actions: Vec<Value> = layout
            .iter()
            .map(|(n, ok, fail)| {
                let mut action = json!({"name": NAMES[*n], "type": "execute", "command": "x"});
                for (edge, target) in [("on_success", ok), ("on_failure", fail)] {
                    if let Some(t) = target {
                        if !names.contains(TARGETS[*t]) {
                            expected += 1;
                        }
                        action[edge] = json!(TARGETS[*t]);
                    }
                }
                action
            })
            .collect();

        let report = validate(&doc_with_actions(actions));
        let reference_errors = report
            .errors()
            .iter()
            .filter(|e| e.category == FindingCategory::Reference)
            .count();
        prop_assert_eq!(reference_errors, expected);
    }

    #[test]
    fn repeated_names_always_flagged(layout in arb_actions()) {
        let mut seen = HashSet::new();
        let mut repeats = 0;
        let actions: Vec<Value> = layout
            .iter()
            .map(|(n, _, _)| {
                if !seen.insert(*n) {
                    repeats += 1;
                }
                json!({"name": NAMES[*n], "type": "execute", "command": "x"})
            })
            .collect();

        let report = validate(&doc_with_actions(actions));
        let duplicates = report
            .errors()
            .iter()
            .filter(|e| e.message.starts_with("Duplicate action name"))
            .count();
        prop_assert_eq!(duplicates, repeats);
        prop_assert_eq!(report.is_valid(), repeats == 0);
    }
}
