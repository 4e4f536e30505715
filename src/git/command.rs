use crate::error::{ExportError, ExportResult};
use crate::git::GitClient;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Non-ASCII names in diff headers are printed literally instead of octal-escaped.
const GLOBAL_ARGS: [&str; 2] = ["-c", "core.quotepath=false"];

/// Argument vector for the name-only tree-diff between two revisions.
/// `-z` makes git emit NUL-terminated, unquoted paths.
pub fn diff_tree_args(old: &str, young: &str) -> Vec<String> {
    [
        "diff-tree",
        "-r",
        "-z",
        "--no-commit-id",
        "--name-only",
        "--diff-filter=ACMT",
        old,
        young,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Argument vector for the single-path diff between two revisions
pub fn diff_file_args(old: &str, young: &str, path: &str) -> Vec<String> {
    ["--no-pager", "diff", "--no-color", old, young, "--", path]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Runs the git executable directly, never through a shell.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    work_tree: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<String>, work_tree: &Path) -> Self {
        Self {
            program: program.into(),
            work_tree: work_tree.to_path_buf(),
        }
    }

    /// Runs git to completion and returns its stdout untouched.
    pub async fn run(&self, args: &[String]) -> ExportResult<Vec<u8>> {
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(GLOBAL_ARGS)
            .args(args)
            // Path arguments are file names, never glob patterns
            .env("GIT_LITERAL_PATHSPECS", "1")
            .current_dir(&self.work_tree)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ExportError::GitLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExportError::GitFailed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl GitClient for GitCli {
    async fn diff_tree(&self, old: &str, young: &str) -> ExportResult<Vec<u8>> {
        self.run(&diff_tree_args(old, young)).await
    }

    async fn diff_file(&self, old: &str, young: &str, path: &str) -> ExportResult<Vec<u8>> {
        self.run(&diff_file_args(old, young, path)).await
    }
}
