//! Human-readable and JSON report output.

use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::batch::BatchReport;
use crate::error::ValidationReport;

fn rule() -> String {
    "=".repeat(60)
}

/// The per-file block printed by the CLI.
pub fn render_text(path: &Path, report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "Validating: {}", path.display());
    let _ = writeln!(out, "{}", rule());

    if !report.errors().is_empty() {
        let _ = writeln!(out, "\nERRORS:");
        for error in report.errors() {
            let _ = writeln!(out, "  - {}", error);
        }
    }

    if !report.warnings().is_empty() {
        let _ = writeln!(out, "\nWARNINGS:");
        for warning in report.warnings() {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    let verdict = match (report.is_valid(), report.warnings().is_empty()) {
        (true, true) => "Configuration is VALID",
        (true, false) => "Configuration is VALID (with warnings)",
        (false, _) => "Configuration is INVALID",
    };
    let _ = writeln!(out, "\n{}", verdict);
    out
}

/// Aggregate totals after a batch run.
pub fn render_summary(batch: &BatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Summary: {} files validated", batch.len());
    let _ = writeln!(out, "  Errors: {}", batch.total_errors());
    let _ = writeln!(out, "  Warnings: {}", batch.total_warnings());
    let _ = writeln!(out, "{}", rule());
    out
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    valid: bool,
    errors: Vec<&'a str>,
    warnings: Vec<&'a str>,
}

impl<'a> JsonFile<'a> {
    fn new(path: &Path, report: &'a ValidationReport) -> Self {
        JsonFile {
            path: path.display().to_string(),
            valid: report.is_valid(),
            errors: report.error_messages(),
            warnings: report.warning_messages(),
        }
    }
}

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    valid: bool,
    errors: usize,
    warnings: usize,
}

#[derive(Serialize)]
struct JsonBatch<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
}

pub fn render_json(path: &Path, report: &ValidationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonFile::new(path, report))
}

pub fn render_batch_json(batch: &BatchReport) -> Result<String, serde_json::Error> {
    let out = JsonBatch {
        files: batch
            .files
            .iter()
            .map(|f| JsonFile::new(&f.path, &f.report))
            .collect(),
        summary: JsonSummary {
            files: batch.len(),
            valid: batch.all_valid(),
            errors: batch.total_errors(),
            warnings: batch.total_warnings(),
        },
    };
    serde_json::to_string_pretty(&out)
}
