//! Bot configuration validation: structure, per-section rules, and action
//! workflow references.
//!
//! Returns **all** errors and warnings, not just the first. A bad record is
//! reported and skipped; the pass always continues with the next record and
//! the next section. Validation does not modify the document.

use crate::error::FindingCategory::{Constraint, Reference, Structural};
use crate::error::ValidationReport;
use crate::schema::{Schema, SectionRequirement, is_one_of, list};
use crate::types::{Document, Map, Value};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static VERSION_PART_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

const DEPENDENCY_KINDS: [&str; 3] = ["required", "optional", "conflicts"];

/// Validate a document against the default LotaBot schema.
pub fn validate(doc: &Document) -> ValidationReport {
    Validator::default().validate(doc)
}

/// Runs every rule against a document using an injected [`Schema`].
///
/// Holds no per-run state, so one validator can check any number of
/// documents, each into its own report.
#[derive(Clone, Debug, Default)]
pub struct Validator {
    schema: Schema,
}

impl Validator {
    pub fn new(schema: Schema) -> Self {
        Validator { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn validate(&self, doc: &Document) -> ValidationReport {
        let schema = &self.schema;
        let mut report = ValidationReport::default();

        check_structure(schema, doc, &mut report);

        if let Some(bot) = doc.section("bot") {
            check_bot(schema, bot, &mut report);
        }
        if let Some(triggers) = doc.section("triggers") {
            check_triggers(schema, triggers, &mut report);
        }
        if let Some(actions) = doc.section("actions") {
            check_actions(schema, actions, &mut report);
        }
        if let Some(constraints) = doc.section("constraints") {
            check_constraints(schema, constraints, &mut report);
        }
        if let Some(dependencies) = doc.section("dependencies") {
            check_dependencies(schema, dependencies, &mut report);
        }
        if let Some(security) = doc.section("security") {
            check_security(schema, security, &mut report);
        }
        if let Some(monitoring) = doc.section("monitoring") {
            check_monitoring(schema, monitoring, &mut report);
        }

        if let Some(actions) = doc.section("actions") {
            check_action_workflow(actions, &mut report);
        }

        report
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Body of a mapping-shaped section. `null` reads as an empty mapping.
fn section_body(value: &Value) -> Option<&Map> {
    static EMPTY: LazyLock<Map> = LazyLock::new(Map::new);
    match value {
        Value::Null => Some(&EMPTY),
        Value::Map(map) => Some(map),
        _ => None,
    }
}

fn report_not_a_mapping(section: &str, report: &mut ValidationReport) {
    report.error(Constraint, format!("Section '{}' must be a mapping", section));
}

/// Section body for a section validator. A non-mapping is reported here
/// unless a `Fields` rule already reported it during the structural pass.
fn section_map<'a>(
    schema: &Schema,
    section: &str,
    value: &'a Value,
    report: &mut ValidationReport,
) -> Option<&'a Map> {
    let body = section_body(value);
    if body.is_none() && !schema.requires_fields(section) {
        report_not_a_mapping(section, report);
    }
    body
}

/// Key for duplicate detection and reference lookups: `1` and `"1"` differ.
type NameKey = (&'static str, String);

fn name_key(value: &Value) -> NameKey {
    (value.type_name(), value.to_string())
}

fn is_positive_integer(value: &Value) -> bool {
    value.as_integer().is_some_and(|n| n > 0)
}

// ─── Structure ──────────────────────────────────────────────────────────────

fn check_structure(schema: &Schema, doc: &Document, report: &mut ValidationReport) {
    for rule in &schema.sections {
        let Some(body) = doc.section(&rule.section) else {
            report.error(
                Structural,
                format!("Missing required section: {}", rule.section),
            );
            continue;
        };

        match &rule.requirement {
            SectionRequirement::NonEmpty => {
                if !body.is_truthy() {
                    report.error(
                        Structural,
                        format!("Section '{}' cannot be empty", rule.section),
                    );
                }
            }
            SectionRequirement::Fields(fields) => {
                // A present-but-null section counts as an empty mapping.
                let Some(map) = section_body(body) else {
                    report_not_a_mapping(&rule.section, report);
                    continue;
                };
                for field in fields {
                    if !map.contains_key(field) {
                        report.error(
                            Structural,
                            format!("Missing required field: {}.{}", rule.section, field),
                        );
                    }
                }
            }
        }
    }
}

// ─── Bot ────────────────────────────────────────────────────────────────────

fn check_bot(schema: &Schema, bot: &Value, report: &mut ValidationReport) {
    // Shape problems were already reported by the structural check.
    let Some(bot) = bot.as_map() else {
        return;
    };

    if let Some(category) = bot.get("category")
        && !category
            .as_str()
            .is_some_and(|c| is_one_of(&schema.categories, c))
    {
        report.error(
            Constraint,
            format!(
                "Invalid category '{}'. Must be one of: {}",
                category,
                list(&schema.categories)
            ),
        );
    }

    if let Some(version) = bot.get("version") {
        check_version(version, report);
    }

    if let Some(name) = bot.get("name") {
        let name = name.to_string();
        if !name.chars().next().is_some_and(char::is_uppercase) {
            report.warning(format!("Bot name '{}' should start with uppercase letter", name));
        }
        if !name.ends_with(schema.name_suffix.as_str()) {
            report.warning(format!(
                "Bot name '{}' should end with '{}'",
                name, schema.name_suffix
            ));
        }
    }
}

/// `MAJOR.MINOR.PATCH`, digits only. One error per non-numeric segment.
fn check_version(version: &Value, report: &mut ValidationReport) {
    let Some(text) = version.as_str() else {
        report.error(
            Constraint,
            format!(
                "Invalid version format '{}'. Expected semantic version (e.g., '1.0.0')",
                version
            ),
        );
        return;
    };

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 3 {
        report.error(
            Constraint,
            format!(
                "Invalid version format '{}'. Expected semantic version (e.g., '1.0.0')",
                text
            ),
        );
        return;
    }
    for part in parts {
        if !VERSION_PART_RE.is_match(part) {
            report.error(
                Constraint,
                format!("Invalid version format '{}'. Each part must be a number", text),
            );
        }
    }
}

// ─── Triggers ───────────────────────────────────────────────────────────────

fn check_triggers(schema: &Schema, triggers: &Value, report: &mut ValidationReport) {
    if !triggers.is_truthy() {
        report.error(Structural, "At least one trigger is required");
        return;
    }
    let Some(triggers) = triggers.as_list() else {
        report.error(Constraint, "Section 'triggers' must be a list");
        return;
    };

    for (i, trigger) in triggers.iter().enumerate() {
        let Some(trigger) = trigger.as_map() else {
            report.error(Constraint, format!("Trigger {}: Entry must be a mapping", i));
            continue;
        };

        let Some(trigger_type) = trigger.get("type") else {
            report.error(Structural, format!("Trigger {}: Missing 'type' field", i));
            continue;
        };

        if !trigger_type
            .as_str()
            .is_some_and(|t| is_one_of(&schema.trigger_types, t))
        {
            report.error(
                Constraint,
                format!(
                    "Trigger {}: Invalid type '{}'. Must be one of: {}",
                    i,
                    trigger_type,
                    list(&schema.trigger_types)
                ),
            );
        }

        match trigger.get("pattern") {
            None => {
                report.error(Structural, format!("Trigger {}: Missing 'pattern' field", i));
            }
            Some(pattern) if !pattern.as_str().is_some_and(|p| !p.is_empty()) => {
                report.error(
                    Constraint,
                    format!("Trigger {}: 'pattern' must be a non-empty string", i),
                );
            }
            Some(_) => {}
        }

        if let Some(priority) = trigger.get("priority")
            && !priority
                .as_str()
                .is_some_and(|p| is_one_of(&schema.priorities, p))
        {
            report.error(
                Constraint,
                format!(
                    "Trigger {}: Invalid priority '{}'. Must be one of: {}",
                    i,
                    priority,
                    list(&schema.priorities)
                ),
            );
        }
    }
}

// ─── Actions ────────────────────────────────────────────────────────────────

fn check_actions(schema: &Schema, actions: &Value, report: &mut ValidationReport) {
    if !actions.is_truthy() {
        report.error(Structural, "At least one action is required");
        return;
    }
    let Some(actions) = actions.as_list() else {
        report.error(Constraint, "Section 'actions' must be a list");
        return;
    };

    let mut seen = HashSet::new();

    for (i, action) in actions.iter().enumerate() {
        let Some(action) = action.as_map() else {
            report.error(Constraint, format!("Action {}: Entry must be a mapping", i));
            continue;
        };

        let Some(name) = action.get("name") else {
            report.error(Structural, format!("Action {}: Missing 'name' field", i));
            continue;
        };
        let key = name_key(name);
        let name = name.to_string();

        if !seen.insert(key) {
            report.error(Constraint, format!("Duplicate action name: '{}'", name));
        }

        let Some(action_type) = action.get("type") else {
            report.error(Structural, format!("Action '{}': Missing 'type' field", name));
            continue;
        };

        if !action_type
            .as_str()
            .is_some_and(|t| is_one_of(&schema.action_types, t))
        {
            report.error(
                Constraint,
                format!(
                    "Action '{}': Invalid type '{}'. Must be one of: {}",
                    name,
                    action_type,
                    list(&schema.action_types)
                ),
            );
        }

        if !action.contains_key("command") {
            report.error(Structural, format!("Action '{}': Missing 'command' field", name));
        }

        if let Some(timeout) = action.get("timeout") {
            match timeout.as_integer() {
                Some(secs) if secs > 0 => {
                    if secs > i128::from(schema.long_timeout_secs) {
                        report.warning(format!(
                            "Action '{}': Timeout {}s is very long",
                            name, secs
                        ));
                    }
                }
                _ => report.error(
                    Constraint,
                    format!("Action '{}': Timeout must be a positive integer", name),
                ),
            }
        }
    }
}

// ─── Action workflow ────────────────────────────────────────────────────────

/// `on_success` / `on_failure` must name an action in the same list.
///
/// Every record carrying a `name` contributes to the lookup set, including
/// ones that failed other checks or repeat an earlier name.
fn check_action_workflow(actions: &Value, report: &mut ValidationReport) {
    let Some(actions) = actions.as_list() else {
        return;
    };

    let names: HashSet<NameKey> = actions
        .iter()
        .filter_map(|a| a.get("name"))
        .map(name_key)
        .collect();

    for action in actions {
        let Some(name) = action.get("name") else {
            continue;
        };
        for edge in ["on_success", "on_failure"] {
            if let Some(target) = action.get(edge) {
                if !names.contains(&name_key(target)) {
                    report.error(
                        Reference,
                        format!(
                            "Action '{}': {} references unknown action '{}'",
                            name,
                            edge,
                            target
                        ),
                    );
                }
            }
        }
    }
}

// ─── Constraints ────────────────────────────────────────────────────────────

fn check_constraints(schema: &Schema, constraints: &Value, report: &mut ValidationReport) {
    let Some(constraints) = section_map(schema, "constraints", constraints, report) else {
        return;
    };

    if let Some(max_jobs) = constraints.get("max_concurrent_jobs")
        && !is_positive_integer(max_jobs)
    {
        report.error(Constraint, "max_concurrent_jobs must be a positive integer");
    }

    if let Some(timeout) = constraints.get("timeout")
        && !is_positive_integer(timeout)
    {
        report.error(Constraint, "timeout must be a positive integer");
    }

    let Some(retry) = constraints.get("retry_policy") else {
        return;
    };
    let retry = match retry {
        Value::Null => return,
        Value::Map(map) => map,
        _ => {
            report.error(Constraint, "constraints.retry_policy must be a mapping");
            return;
        }
    };

    if let Some(backoff) = retry.get("backoff")
        && !backoff
            .as_str()
            .is_some_and(|b| is_one_of(&schema.backoff_strategies, b))
    {
        report.error(
            Constraint,
            format!(
                "Invalid backoff strategy '{}'. Must be one of: {}",
                backoff,
                list(&schema.backoff_strategies)
            ),
        );
    }

    if let Some(max_attempts) = retry.get("max_attempts")
        && !max_attempts.as_integer().is_some_and(|n| n >= 0)
    {
        report.error(Constraint, "max_attempts must be a non-negative integer");
    }
}

// ─── Dependencies ───────────────────────────────────────────────────────────

fn check_dependencies(schema: &Schema, dependencies: &Value, report: &mut ValidationReport) {
    let Some(dependencies) = section_map(schema, "dependencies", dependencies, report) else {
        return;
    };

    for kind in DEPENDENCY_KINDS {
        let Some(deps) = dependencies.get(kind) else {
            continue;
        };
        let Some(deps) = deps.as_list() else {
            report.error(Constraint, format!("dependencies.{} must be a list", kind));
            continue;
        };

        for dep in deps {
            match dep.as_str() {
                None => report.error(
                    Constraint,
                    format!("dependencies.{}: All items must be strings", kind),
                ),
                Some(name) if !name.ends_with(schema.name_suffix.as_str()) => {
                    report.warning(format!(
                        "Dependency '{}' should end with '{}'",
                        name, schema.name_suffix
                    ));
                }
                Some(_) => {}
            }
        }
    }

    check_dependency_overlap(dependencies, report);
}

/// A bot may not both require and conflict with the same bot. All shared
/// names go into one error, in `required` order.
fn check_dependency_overlap(dependencies: &Map, report: &mut ValidationReport) {
    let (Some(required), Some(conflicts)) = (
        dependencies.get("required").and_then(Value::as_list),
        dependencies.get("conflicts").and_then(Value::as_list),
    ) else {
        return;
    };

    let conflicts: HashSet<&str> = conflicts.iter().filter_map(Value::as_str).collect();
    let mut overlap: Vec<&str> = Vec::new();
    for name in required.iter().filter_map(Value::as_str) {
        if conflicts.contains(name) && !overlap.contains(&name) {
            overlap.push(name);
        }
    }

    if !overlap.is_empty() {
        report.error(
            Reference,
            format!(
                "Bot cannot both require and conflict with: {}",
                overlap.join(", ")
            ),
        );
    }
}

// ─── Security ───────────────────────────────────────────────────────────────

fn check_security(schema: &Schema, security: &Value, report: &mut ValidationReport) {
    let Some(security) = section_map(schema, "security", security, report) else {
        return;
    };
    let Some(permissions) = security.get("permissions") else {
        return;
    };
    let Some(permissions) = permissions.as_list() else {
        report.error(Constraint, "security.permissions must be a list");
        return;
    };

    for (i, perm) in permissions.iter().enumerate() {
        let Some(perm) = perm.as_map() else {
            report.error(Constraint, format!("Permission {}: Entry must be a mapping", i));
            continue;
        };
        if !perm.contains_key("resource") {
            report.error(Structural, format!("Permission {}: Missing 'resource' field", i));
        }
        match perm.get("actions") {
            None => {
                report.error(Structural, format!("Permission {}: Missing 'actions' field", i));
            }
            Some(actions) if actions.as_list().is_none() => {
                report.error(Constraint, format!("Permission {}: 'actions' must be a list", i));
            }
            Some(_) => {}
        }
    }
}

// ─── Monitoring ─────────────────────────────────────────────────────────────

fn check_monitoring(schema: &Schema, monitoring: &Value, report: &mut ValidationReport) {
    let Some(monitoring) = section_map(schema, "monitoring", monitoring, report) else {
        return;
    };
    let logging = match monitoring.get("logging") {
        None | Some(Value::Null) => return,
        Some(Value::Map(map)) => map,
        Some(_) => {
            report.error(Constraint, "monitoring.logging must be a mapping");
            return;
        }
    };

    if let Some(level) = logging.get("level")
        && !level
            .as_str()
            .is_some_and(|l| is_one_of(&schema.log_levels, l))
    {
        report.error(
            Constraint,
            format!(
                "Invalid log level '{}'. Must be one of: {}",
                level,
                list(&schema.log_levels)
            ),
        );
    }

    if let Some(format) = logging.get("format")
        && !format
            .as_str()
            .is_some_and(|f| is_one_of(&schema.log_formats, f))
    {
        report.error(
            Constraint,
            format!(
                "Invalid log format '{}'. Must be one of: {}",
                format,
                list(&schema.log_formats)
            ),
        );
    }
}
