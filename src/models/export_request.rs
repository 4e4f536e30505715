use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Export strategy selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// Copy each changed file from the working tree
    #[default]
    Copy,
    /// Write the unified diff of each changed file
    Diff,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::Copy => write!(f, "copy"),
            ExportMode::Diff => write!(f, "diff"),
        }
    }
}

/// One export run, built once from the command line and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub old_revision: String,
    pub young_revision: String,
    pub output_directory: PathBuf,
    pub work_tree: PathBuf,
    pub verbose: bool,
    pub mode: ExportMode,
}

impl ExportRequest {
    /// Returns `None` when any of the three required values is missing or blank.
    pub fn new(
        old_revision: Option<&str>,
        young_revision: Option<&str>,
        output_directory: Option<&str>,
        work_tree: &Path,
    ) -> Option<Self> {
        let old_revision = non_blank(old_revision)?;
        let young_revision = non_blank(young_revision)?;
        let output_directory = non_blank(output_directory)?;

        Some(Self {
            old_revision,
            young_revision,
            output_directory: PathBuf::from(output_directory),
            work_tree: work_tree.to_path_buf(),
            verbose: false,
            mode: ExportMode::Copy,
        })
    }

    pub fn with_mode(self, mode: ExportMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_all_three_values() {
        let cwd = Path::new("/work");
        assert!(ExportRequest::new(None, Some("b"), Some("out"), cwd).is_none());
        assert!(ExportRequest::new(Some("a"), None, Some("out"), cwd).is_none());
        assert!(ExportRequest::new(Some("a"), Some("b"), None, cwd).is_none());
        assert!(ExportRequest::new(Some("a"), Some("b"), Some("out"), cwd).is_some());
    }

    #[test]
    fn test_request_rejects_blank_values() {
        let cwd = Path::new("/work");
        assert!(ExportRequest::new(Some(""), Some("b"), Some("out"), cwd).is_none());
        assert!(ExportRequest::new(Some("a"), Some("  "), Some("out"), cwd).is_none());
    }

    #[test]
    fn test_request_defaults_to_quiet_copy() {
        let request =
            ExportRequest::new(Some("HEAD~1"), Some("HEAD"), Some("out"), Path::new("/work"))
                .unwrap();
        assert_eq!(request.mode, ExportMode::Copy);
        assert!(!request.verbose);
        assert_eq!(request.output_directory, PathBuf::from("out"));

        let request = request.with_mode(ExportMode::Diff).with_verbose(true);
        assert_eq!(request.mode, ExportMode::Diff);
        assert!(request.verbose);
    }
}
