use lotabot_config::types::Document;
use lotabot_config::validate::validate;
use proptest::prelude::*;
use serde_json::json;

fn doc_with_version(version: &str) -> Document {
    Document::try_from(json!({
        "bot": {
            "name": "BackupBot",
            "version": version,
            "enabled": true,
            "description": "x",
            "category": "infrastructure"
        },
        "triggers": [{"type": "schedule", "pattern": "0 0 * * *"}],
        "actions": [{"name": "run", "type": "execute", "command": "backup.sh"}]
    }))
    .unwrap()
}

fn version_errors(version: &str) -> usize {
    validate(&doc_with_version(version))
        .errors()
        .iter()
        .filter(|e| e.message.starts_with("Invalid version format"))
        .count()
}

fn is_semver_shape(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn numeric_triples_accepted(a in 0u32..10_000, b in 0u32..10_000, c in 0u32..10_000) {
        let version = format!("{}.{}.{}", a, b, c);
        prop_assert_eq!(version_errors(&version), 0, "version {:?}", version);
    }

    #[test]
    fn leading_zero_segments_accepted(a in "[0-9]{1,4}", b in "[0-9]{1,4}", c in "[0-9]{1,4}") {
        let version = format!("{}.{}.{}", a, b, c);
        prop_assert_eq!(version_errors(&version), 0);
    }

    #[test]
    fn wrong_segment_count_rejected(parts in prop::collection::vec(0u32..100, 1..6)) {
        prop_assume!(parts.len() != 3);
        let version = parts.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
        prop_assert_eq!(version_errors(&version), 1, "version {:?}", version);
    }

    #[test]
    fn verdict_matches_pattern(version in "[0-9a-z.\\-]{0,12}") {
        let errors = version_errors(&version);
        if is_semver_shape(&version) {
            prop_assert_eq!(errors, 0, "version {:?}", version);
        } else {
            prop_assert!(errors >= 1, "version {:?} should be rejected", version);
        }
    }
}
