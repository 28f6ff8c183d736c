//! File-level entry points: read, parse, validate.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{LoadError, ValidationReport};
use crate::parse::parse;
use crate::types::Document;
use crate::validate::Validator;

/// Read and parse one configuration file.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let input = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(path = %path.display(), bytes = input.len(), "read configuration");
    Ok(parse(&input)?)
}

/// Validate one file, keeping document-level failures distinct from rule
/// findings.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file is missing, unreadable, malformed,
/// or empty. No rule runs in that case.
pub fn check_file(validator: &Validator, path: &Path) -> Result<ValidationReport, LoadError> {
    let doc = load_document(path)?;
    let report = validator.validate(&doc);
    debug!(
        path = %path.display(),
        errors = report.errors().len(),
        warnings = report.warnings().len(),
        "validated configuration"
    );
    Ok(report)
}

/// Like [`check_file`], but a document-level failure becomes a report with a
/// single error.
pub fn validate_file(validator: &Validator, path: &Path) -> ValidationReport {
    check_file(validator, path).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "configuration could not be loaded");
        ValidationReport::from(err)
    })
}
