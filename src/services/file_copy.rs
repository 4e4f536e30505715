use crate::error::ExportResult;
use crate::models::{ExportMode, ExportOutcome, ExportReport, ExportRequest, ExportStatus};
use crate::utils::{copy_file_overwrite, ensure_parent_dir, join_relative};
use std::path::Path;
use tracing::{debug, error, info};

/// Copy every changed file from the work tree into the output directory.
/// Missing sources and per-file filesystem errors are recorded, never fatal.
/// `on_outcome` sees each outcome as soon as it is recorded.
pub fn export_copy<F>(
    request: &ExportRequest,
    files: &[String],
    mut on_outcome: F,
) -> ExportReport
where
    F: FnMut(&ExportOutcome),
{
    info!(
        "Copying {} files from {} to {}",
        files.len(),
        request.work_tree.display(),
        request.output_directory.display()
    );

    let mut report = ExportReport::empty(
        ExportMode::Copy,
        &request.old_revision,
        &request.young_revision,
    );

    for file in files {
        let source = join_relative(&request.work_tree, file);
        let destination = join_relative(&request.output_directory, file);
        let status = match copy_one(&source, &destination) {
            Ok(true) => {
                debug!("Copied {} to {}", source.display(), destination.display());
                ExportStatus::Copied
            }
            Ok(false) => {
                debug!("Could not find file: {}", source.display());
                ExportStatus::Missing
            }
            Err(e) => {
                error!("Failed to copy {} to {}: {}", source.display(), destination.display(), e);
                ExportStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        let outcome = ExportOutcome::new(source, destination, status);
        on_outcome(&outcome);
        report.record(outcome);
    }

    info!(
        "File copy completed. Copied: {}, Missing: {}, Errors: {}",
        report.copied, report.missing, report.failed
    );

    report.finish()
}

fn copy_one(source: &Path, destination: &Path) -> ExportResult<bool> {
    ensure_parent_dir(destination)?;
    copy_file_overwrite(source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn request(work_tree: &Path, output: &Path) -> ExportRequest {
        ExportRequest::new(
            Some("old"),
            Some("young"),
            output.to_str(),
            work_tree,
        )
        .unwrap()
    }

    #[test]
    fn test_copies_present_files_and_skips_missing() {
        let work = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::create_dir_all(work.path().join("src")).unwrap();
        fs::write(work.path().join("src/a.txt"), "alpha\n").unwrap();

        let files = vec!["src/a.txt".to_string(), "src/b.txt".to_string()];
        let mut seen = Vec::new();
        let report = export_copy(&request(work.path(), out.path()), &files, |outcome| {
            seen.push(outcome.to_string())
        });

        assert_eq!(
            fs::read(out.path().join("src/a.txt")).unwrap(),
            fs::read(work.path().join("src/a.txt")).unwrap()
        );
        assert!(!out.path().join("src/b.txt").exists());
        assert_eq!((report.copied, report.missing, report.failed), (1, 1, 0));

        let lines: Vec<String> = report.outcomes.iter().map(|o| o.to_string()).collect();
        assert_eq!(lines, seen);
        assert_eq!(
            lines,
            vec![
                format!("Copied: {}", out.path().join("src").join("a.txt").display()),
                format!(
                    "Could not find file: {}",
                    work.path().join("src").join("b.txt").display()
                ),
            ]
        );
    }

    #[test]
    fn test_second_run_overwrites_with_identical_result() {
        let work = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(work.path().join("a.txt"), "one").unwrap();
        let files = vec!["a.txt".to_string()];
        let req = request(work.path(), out.path());

        export_copy(&req, &files, |_| {});
        fs::write(out.path().join("a.txt"), "tampered with").unwrap();
        let report = export_copy(&req, &files, |_| {});

        assert_eq!(report.copied, 1);
        assert_eq!(fs::read_to_string(out.path().join("a.txt")).unwrap(), "one");
    }

    #[test]
    fn test_binary_content_is_byte_identical() {
        let work = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let bytes: Vec<u8> = (0..=255).collect();
        fs::write(work.path().join("blob.bin"), &bytes).unwrap();

        let files = vec!["blob.bin".to_string()];
        export_copy(&request(work.path(), out.path()), &files, |_| {});

        assert_eq!(fs::read(out.path().join("blob.bin")).unwrap(), bytes);
    }

    #[test]
    fn test_unwritable_destination_is_recorded_and_run_continues() {
        let work = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(work.path().join("blocked"), "x").unwrap();
        fs::write(work.path().join("ok.txt"), "y").unwrap();
        // A directory sitting where the file should go
        fs::create_dir_all(out.path().join("blocked")).unwrap();

        let files = vec!["blocked".to_string(), "ok.txt".to_string()];
        let report = export_copy(&request(work.path(), out.path()), &files, |_| {});

        assert_eq!(report.failed, 1);
        assert_eq!(report.copied, 1);
        assert!(report.outcomes[0].is_failure());
        assert_eq!(fs::read_to_string(out.path().join("ok.txt")).unwrap(), "y");
    }

    #[test]
    fn test_empty_file_list() {
        let work = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let report = export_copy(&request(work.path(), out.path()), &[], |_| {});
        assert_eq!(report.total_processed(), 0);
        assert!(report.finished_at.is_some());
    }
}
