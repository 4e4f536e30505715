pub mod error;
pub mod git;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::{ExportError, ExportResult};
pub use git::{fetch_changed_files, GitCli, GitClient};
pub use models::{ExportMode, ExportOutcome, ExportReport, ExportRequest, ExportStatus};
pub use services::{export_copy, export_diff, run_export, write_report};

use std::path::PathBuf;

/// Git executable used when neither `--git` nor `GIT_EXPORT_GIT` is set
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Environment variable naming the git executable
pub const GIT_PROGRAM_ENV: &str = "GIT_EXPORT_GIT";

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub request: ExportRequest,
    pub git_program: String,
    pub report_path: Option<PathBuf>,
    pub log_level: String,
}
