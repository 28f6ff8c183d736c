use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Finding severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Which kind of rule produced a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// The document itself could not be loaded (missing, unreadable, malformed, empty).
    Document,
    /// A required section or field is absent.
    Structural,
    /// A value is present but has the wrong shape, range, or enumeration member.
    Constraint,
    /// A named reference to another record does not resolve.
    Reference,
    /// Naming conventions and soft thresholds. Always a warning.
    Style,
}

/// One reported problem. Section and field context live in the message text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ─── ValidationReport ───────────────────────────────────────────────────────

/// Ordered errors and warnings from one validation pass.
///
/// Only the validator appends to a report. Once handed back to the caller it
/// is read-only, and every pass starts from a fresh one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl ValidationReport {
    /// A document is valid iff no errors were recorded. Warnings never count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|f| f.message.as_str()).collect()
    }

    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|f| f.message.as_str()).collect()
    }

    /// `(is_valid, errors, warnings)`.
    pub fn into_parts(self) -> (bool, Vec<String>, Vec<String>) {
        let valid = self.is_valid();
        (
            valid,
            self.errors.into_iter().map(|f| f.message).collect(),
            self.warnings.into_iter().map(|f| f.message).collect(),
        )
    }

    pub(crate) fn error(&mut self, category: FindingCategory, message: impl Into<String>) {
        self.errors.push(Finding {
            severity: Severity::Error,
            category,
            message: message.into(),
        });
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(Finding {
            severity: Severity::Warning,
            category: FindingCategory::Style,
            message: message.into(),
        });
    }
}

impl From<LoadError> for ValidationReport {
    fn from(err: LoadError) -> Self {
        let mut report = ValidationReport::default();
        report.error(FindingCategory::Document, err.to_string());
        report
    }
}

// ─── ParseError ─────────────────────────────────────────────────────────────

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
    /// Deserialization succeeded but produced nothing to validate.
    Empty,
}

/// Produced by `parse` when YAML deserialization fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{}:{}: {}", line, col, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

// ─── LoadError ──────────────────────────────────────────────────────────────

/// Document-level failures. Each one stops the pass before any rule runs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Configuration file is empty")]
    Empty,
    #[error("YAML parsing error: {0}")]
    Parse(ParseError),
    #[error("Unexpected error: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        match err.kind {
            ParseErrorKind::Empty => LoadError::Empty,
            _ => LoadError::Parse(err),
        }
    }
}
