use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while talking to git or writing the export tree.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to launch {program}: {source}")]
    GitLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("git {args} exited with {status}: {stderr}")]
    GitFailed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write report {path:?}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
