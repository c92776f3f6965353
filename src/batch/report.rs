//! Per-file outcomes and the batch summary.
//!
//! Every input file ends up as exactly one [`FileReport`]; the whole run
//! is summarized by [`BatchSummary`]. Both serialize to JSON for the
//! `--report` flag.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

/// What happened to one input file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Converted and written to `output`.
    Converted { output: PathBuf, bytes: u64 },
    /// Not converted; `reason` says why.
    Skipped { reason: String },
}

/// Outcome for a single input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileReport {
    pub fn converted(input: PathBuf, output: PathBuf, bytes: u64) -> Self {
        Self {
            input,
            outcome: Outcome::Converted { output, bytes },
        }
    }

    pub fn skipped(input: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            input,
            outcome: Outcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self.outcome, Outcome::Converted { .. })
    }
}

/// Summary of one batch run.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub started_at: DateTime<Local>,
    pub duration_secs: f64,
    pub total: usize,
    pub converted: usize,
    pub skipped: usize,
    pub bytes_written: u64,
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    /// Tally the per-file reports into a summary.
    pub fn from_reports(
        started_at: DateTime<Local>,
        duration_secs: f64,
        files: Vec<FileReport>,
    ) -> Self {
        let converted = files.iter().filter(|f| f.is_converted()).count();
        let bytes_written = files
            .iter()
            .map(|f| match f.outcome {
                Outcome::Converted { bytes, .. } => bytes,
                Outcome::Skipped { .. } => 0,
            })
            .sum();
        Self {
            started_at,
            duration_secs,
            total: files.len(),
            converted,
            skipped: files.len() - converted,
            bytes_written,
            files,
        }
    }
}
