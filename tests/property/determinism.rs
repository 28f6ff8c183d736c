use lotabot_config::types::Document;
use lotabot_config::validate::validate;
use proptest::prelude::*;
use serde_json::{Value, json};

fn base() -> Value {
    json!({
        "bot": {
            "name": "BackupBot",
            "version": "1.0.0",
            "enabled": true,
            "description": "x",
            "category": "infrastructure"
        },
        "triggers": [{"type": "schedule", "pattern": "0 0 * * *"}],
        "actions": [{"name": "run", "type": "execute", "command": "backup.sh"}]
    })
}

/// Arbitrary-ish scalar, including the wrong types validators must tolerate.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-10i64..10_000).prop_map(Value::from),
        "[a-zA-Z_.]{0,10}".prop_map(Value::from),
    ]
}

fn arb_action() -> impl Strategy<Value = Value> {
    (
        prop::option::of(prop_oneof![Just("a"), Just("b"), Just("c")]),
        prop::option::of(prop_oneof![Just("execute"), Just("message"), Just("shell")]),
        prop::option::of(arb_scalar()),
        prop::option::of(prop_oneof![Just("a"), Just("b"), Just("zzz")]),
    )
        .prop_map(|(name, kind, timeout, next)| {
            let mut action = serde_json::Map::new();
            if let Some(name) = name {
                action.insert("name".into(), json!(name));
            }
            if let Some(kind) = kind {
                action.insert("type".into(), json!(kind));
            }
            action.insert("command".into(), json!("x"));
            if let Some(timeout) = timeout {
                action.insert("timeout".into(), timeout);
            }
            if let Some(next) = next {
                action.insert("on_failure".into(), json!(next));
            }
            Value::Object(action)
        })
}

fn arb_document() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(arb_action(), 0..5),
        arb_scalar(),
        arb_scalar(),
        prop::collection::vec(arb_scalar(), 0..4),
    )
        .prop_map(|(actions, version, level, required)| {
            let mut doc = base();
            doc["actions"] = Value::Array(actions);
            doc["bot"]["version"] = version;
            doc["monitoring"] = json!({"logging": {"level": level}});
            doc["dependencies"] = json!({"required": required, "conflicts": ["aBot"]});
            doc
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn validating_twice_is_identical(value in arb_document()) {
        let doc = Document::try_from(value).unwrap();
        let first = validate(&doc);
        let second = validate(&doc);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn validity_is_exactly_no_errors(value in arb_document()) {
        let report = validate(&Document::try_from(value).unwrap());
        prop_assert_eq!(report.is_valid(), report.errors().is_empty());
    }

    #[test]
    fn unrelated_valid_sections_add_no_errors(
        jobs in 1i64..64,
        attempts in 0i64..10,
        backoff in prop_oneof![Just("linear"), Just("exponential"), Just("fixed")],
        level in prop_oneof![Just("debug"), Just("info"), Just("warn"), Just("error")],
        format in prop_oneof![Just("json"), Just("text")],
    ) {
        let plain = validate(&Document::try_from(base()).unwrap());
        prop_assert!(plain.is_valid());

        let mut extended = base();
        extended["constraints"] = json!({
            "max_concurrent_jobs": jobs,
            "timeout": 300,
            "retry_policy": {"backoff": backoff, "max_attempts": attempts}
        });
        extended["security"] = json!({"permissions": [{"resource": "db", "actions": ["read"]}]});
        extended["monitoring"] = json!({"logging": {"level": level, "format": format}});
        extended["dependencies"] = json!({"required": ["DeployBot"], "conflicts": ["LegacyBot"]});
        let report = validate(&Document::try_from(extended).unwrap());
        prop_assert!(report.is_valid(), "{:?}", report.errors());
    }
}
