//! The schema registry: enumerations and required-section tables.
//!
//! [`Schema::default`] is the LotaBot schema. Every table can be replaced,
//! either in code or from a YAML override file, and the result is handed to
//! [`crate::validate::Validator::new`].

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseErrorKind};

/// What a top-level section must contain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRequirement {
    /// Present and truthy.
    NonEmpty,
    /// A mapping carrying each listed key.
    Fields(Vec<String>),
}

/// A top-level section the structural check insists on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRule {
    pub section: String,
    pub requirement: SectionRequirement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schema {
    /// Checked in order; findings follow this order.
    pub sections: Vec<SectionRule>,
    pub categories: Vec<String>,
    pub trigger_types: Vec<String>,
    pub action_types: Vec<String>,
    pub priorities: Vec<String>,
    pub backoff_strategies: Vec<String>,
    pub log_levels: Vec<String>,
    pub log_formats: Vec<String>,
    /// Suffix expected on bot and dependency names.
    pub name_suffix: String,
    /// Action timeouts above this many seconds draw a warning.
    pub long_timeout_secs: i64,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            sections: vec![
                SectionRule {
                    section: "bot".to_string(),
                    requirement: SectionRequirement::Fields(strings(&[
                        "name",
                        "version",
                        "enabled",
                        "description",
                        "category",
                    ])),
                },
                SectionRule {
                    section: "triggers".to_string(),
                    requirement: SectionRequirement::NonEmpty,
                },
                SectionRule {
                    section: "actions".to_string(),
                    requirement: SectionRequirement::NonEmpty,
                },
            ],
            categories: strings(&[
                "infrastructure",
                "development",
                "operations",
                "data",
                "security",
            ]),
            trigger_types: strings(&["event", "schedule", "webhook", "manual"]),
            action_types: strings(&["execute", "message"]),
            priorities: strings(&["critical", "high", "medium", "low"]),
            backoff_strategies: strings(&["linear", "exponential", "fixed"]),
            log_levels: strings(&["debug", "info", "warn", "error"]),
            log_formats: strings(&["json", "text"]),
            name_suffix: "Bot".to_string(),
            long_timeout_secs: 7200,
        }
    }
}

impl Schema {
    /// Parse a schema override. Keys left out keep their default tables.
    pub fn from_yaml(input: &str) -> Result<Schema, ParseError> {
        if input.trim().is_empty() {
            return Ok(Schema::default());
        }
        serde_saphyr::from_str(input).map_err(|e| ParseError {
            kind: ParseErrorKind::Syntax,
            message: e.to_string(),
            line: None,
            column: None,
        })
    }

    /// Whether `section` carries a required-fields rule, which also demands
    /// a mapping body.
    pub fn requires_fields(&self, section: &str) -> bool {
        self.sections.iter().any(|rule| {
            rule.section == section && matches!(rule.requirement, SectionRequirement::Fields(_))
        })
    }
}

/// Membership test against one of the schema tables.
pub(crate) fn is_one_of(table: &[String], value: &str) -> bool {
    table.iter().any(|t| t == value)
}

/// `"a, b, c"` for "Must be one of" messages.
pub(crate) fn list(table: &[String]) -> String {
    table.join(", ")
}
