//! Validator for LotaBot automation bot configurations.
//!
//! A bot configuration is a YAML document with `bot`, `triggers` and
//! `actions` sections plus optional `constraints`, `dependencies`, `security`
//! and `monitoring`. This crate checks one against a [`Schema`] and reports
//! every problem it finds in a single pass:
//!
//! ```text
//! parse(yaml) → Document → Validator::validate(&doc) → ValidationReport
//! ```
//!
//! Errors make a document invalid; warnings are advisory only.
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! bot:
//!   name: BackupBot
//!   version: "1.0.0"
//!   enabled: true
//!   description: Nightly backups
//!   category: infrastructure
//! triggers:
//!   - type: schedule
//!     pattern: "0 0 * * *"
//! actions:
//!   - name: run
//!     type: execute
//!     command: backup.sh
//! "#;
//!
//! let report = lotabot_config::validate_str(yaml).expect("loadable document");
//! assert!(report.is_valid());
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | yes     | Builds the `validate-config` binary (clap, tracing-subscriber, anyhow). |

pub mod batch;
pub mod error;
pub mod load;
pub mod parse;
pub mod render;
pub mod schema;
pub mod types;
pub mod validate;

pub use error::*;
pub use schema::Schema;
pub use types::{Document, Value};

// Re-export entry-point functions at the crate root for convenience.
pub use load::{check_file, validate_file};
pub use parse::parse;
pub use validate::{Validator, validate};

/// Parse and validate a YAML string with the default schema.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] or [`LoadError::Empty`] when the input never
/// reaches the rules; rule findings are always in the returned report.
pub fn validate_str(input: &str) -> Result<ValidationReport, LoadError> {
    let doc = parse::parse(input)?;
    Ok(validate::validate(&doc))
}
