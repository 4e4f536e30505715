use crate::models::ExportMode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Terminal state of a single exported path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Copied,
    Written,
    Missing,
    Failed { reason: String },
}

/// What happened to one changed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub status: ExportStatus,
}

impl ExportOutcome {
    pub fn new(source_path: PathBuf, destination_path: PathBuf, status: ExportStatus) -> Self {
        Self {
            source_path,
            destination_path,
            status,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, ExportStatus::Failed { .. })
    }
}

/// The verbose line printed for this outcome
impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            ExportStatus::Copied => write!(f, "Copied: {}", self.destination_path.display()),
            ExportStatus::Written => write!(f, "Wrote file: {}", self.destination_path.display()),
            ExportStatus::Missing => {
                write!(f, "Could not find file: {}", self.source_path.display())
            }
            ExportStatus::Failed { reason } => {
                write!(f, "Failed: {}: {}", self.destination_path.display(), reason)
            }
        }
    }
}

/// Report for one export run, outcomes kept in processing order
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub mode: ExportMode,
    pub old_revision: String,
    pub young_revision: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub copied: usize,
    pub written: usize,
    pub missing: usize,
    pub failed: usize,
    pub outcomes: Vec<ExportOutcome>,
}

impl ExportReport {
    pub fn empty(mode: ExportMode, old_revision: &str, young_revision: &str) -> Self {
        Self {
            mode,
            old_revision: old_revision.to_string(),
            young_revision: young_revision.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            copied: 0,
            written: 0,
            missing: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ExportOutcome) {
        match outcome.status {
            ExportStatus::Copied => self.copied += 1,
            ExportStatus::Written => self.written += 1,
            ExportStatus::Missing => self.missing += 1,
            ExportStatus::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn total_processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExportOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }
}
