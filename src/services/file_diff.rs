use crate::error::ExportResult;
use crate::git::GitClient;
use crate::models::{ExportMode, ExportOutcome, ExportReport, ExportRequest, ExportStatus};
use crate::utils::{ensure_parent_dir, join_relative, write_file_overwrite};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Write the unified diff of every changed file into the output directory.
///
/// A git failure aborts the run; files already written stay on disk and have
/// already been passed to `on_outcome`.
/// A filesystem failure on one destination is recorded and the loop moves on.
pub async fn export_diff<G, F>(
    git: &G,
    request: &ExportRequest,
    files: &[String],
    mut on_outcome: F,
) -> ExportResult<ExportReport>
where
    G: GitClient,
    F: FnMut(&ExportOutcome),
{
    info!(
        "Writing diffs of {} files ({}..{}) to {}",
        files.len(),
        request.old_revision,
        request.young_revision,
        request.output_directory.display()
    );

    let mut report = ExportReport::empty(
        ExportMode::Diff,
        &request.old_revision,
        &request.young_revision,
    );

    for file in files {
        let destination = join_relative(&request.output_directory, file);
        if let Err(e) = ensure_parent_dir(&destination) {
            error!("Failed to prepare {}: {}", destination.display(), e);
            let outcome = ExportOutcome::new(
                PathBuf::from(file),
                destination,
                ExportStatus::Failed {
                    reason: e.to_string(),
                },
            );
            on_outcome(&outcome);
            report.record(outcome);
            continue;
        }

        let diff = git
            .diff_file(&request.old_revision, &request.young_revision, file)
            .await?;

        let status = match write_file_overwrite(&destination, &diff) {
            Ok(()) => {
                debug!("Wrote {} bytes to {}", diff.len(), destination.display());
                ExportStatus::Written
            }
            Err(e) => {
                error!("Failed to write {}: {}", destination.display(), e);
                ExportStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        let outcome = ExportOutcome::new(PathBuf::from(file), destination, status);
        on_outcome(&outcome);
        report.record(outcome);
    }

    info!(
        "Diff export completed. Written: {}, Errors: {}",
        report.written, report.failed
    );

    Ok(report.finish())
}
