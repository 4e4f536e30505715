use crate::error::{ExportError, ExportResult};
use crate::git::{fetch_changed_files, GitClient};
use crate::models::{ExportMode, ExportOutcome, ExportReport, ExportRequest};
use crate::services::{export_copy, export_diff};
use std::path::Path;
use tracing::info;

/// Fetch the changed files for the request and export them in the chosen mode.
/// `on_outcome` is called once per file, in order, as each file is finished.
pub async fn run_export<G, F>(
    git: &G,
    request: &ExportRequest,
    on_outcome: F,
) -> ExportResult<ExportReport>
where
    G: GitClient,
    F: FnMut(&ExportOutcome),
{
    let files = fetch_changed_files(git, &request.old_revision, &request.young_revision).await?;

    match request.mode {
        ExportMode::Copy => Ok(export_copy(request, &files, on_outcome)),
        ExportMode::Diff => export_diff(git, request, &files, on_outcome).await,
    }
}

/// Save the report as pretty-printed JSON, creating parent directories
pub fn write_report<P: AsRef<Path>>(report: &ExportReport, path: P) -> ExportResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;

    crate::utils::ensure_parent_dir(path)?;
    std::fs::write(path, json).map_err(|source| ExportError::Report {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Report written to {}", path.display());
    Ok(())
}
