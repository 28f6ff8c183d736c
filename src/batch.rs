//! Validate every configuration in a directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::ValidationReport;
use crate::load::validate_file;
use crate::validate::Validator;

/// Directory scanned by `--all` when no other is given.
pub const DEFAULT_BOTS_DIR: &str = "bots";

const CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Discovery failures. Both count as a failed run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("{}/ directory not found", dir.display())]
    MissingDirectory { dir: PathBuf },
    #[error("No configuration files found in {}/", dir.display())]
    NoConfigs { dir: PathBuf },
    #[error("failed to read {}: {source}", dir.display())]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The outcome for one file.
#[derive(Clone, Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub report: ValidationReport,
}

/// Per-file reports in path order. Only totals are aggregated.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn all_valid(&self) -> bool {
        self.files.iter().all(|f| f.report.is_valid())
    }

    pub fn total_errors(&self) -> usize {
        self.files.iter().map(|f| f.report.errors().len()).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.files.iter().map(|f| f.report.warnings().len()).sum()
    }
}

/// Configuration files directly inside `dir`, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::MissingDirectory {
            dir: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| BatchError::Io {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| BatchError::Io {
                dir: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_config = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext));
        if is_config && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(BatchError::NoConfigs {
            dir: dir.to_path_buf(),
        });
    }

    files.sort();
    info!(dir = %dir.display(), count = files.len(), "discovered configurations");
    Ok(files)
}

/// Validate each discovered file with its own fresh report.
pub fn validate_dir(validator: &Validator, dir: &Path) -> Result<BatchReport, BatchError> {
    let files = discover(dir)?
        .into_iter()
        .map(|path| {
            let report = validate_file(validator, &path);
            FileReport { path, report }
        })
        .collect();
    Ok(BatchReport { files })
}
