use lotabot_config::types::Document;
use lotabot_config::validate::validate;
use proptest::prelude::*;
use serde_json::json;

const REQUIRED: [&str; 3] = ["bot", "triggers", "actions"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_error_per_missing_section(keep in prop::array::uniform3(any::<bool>())) {
        prop_assume!(keep.iter().any(|k| !k));

        let full = json!({
            "bot": {
                "name": "BackupBot",
                "version": "1.0.0",
                "enabled": true,
                "description": "x",
                "category": "infrastructure"
            },
            "triggers": [{"type": "schedule", "pattern": "0 0 * * *"}],
            "actions": [{"name": "run", "type": "execute", "command": "backup.sh"}],
            "monitoring": {"logging": {"level": "info"}}
        });
        let dropped: Vec<&str> = REQUIRED
            .iter()
            .zip(keep)
            .filter(|(_, keep)| !keep)
            .map(|(section, _)| *section)
            .collect();
        let value: serde_json::Map<String, serde_json::Value> = full
            .as_object()
            .unwrap()
            .iter()
            .filter(|(key, _)| !dropped.contains(&key.as_str()))
            .map(|(key, body)| (key.clone(), body.clone()))
            .collect();
        let value = serde_json::Value::Object(value);

        let report = validate(&Document::try_from(value).unwrap());
        prop_assert!(!report.is_valid());
        for (section, keep) in REQUIRED.iter().zip(keep) {
            let expected = format!("Missing required section: {}", section);
            let count = report.errors().iter().filter(|e| e.message == expected).count();
            prop_assert_eq!(count, usize::from(!keep), "section {}", section);
        }
        let missing = keep.iter().filter(|k| !**k).count();
        prop_assert_eq!(report.errors().len(), missing, "{:?}", report.errors());
    }
}
