use crate::error::ExportResult;
use crate::git::GitClient;
use tracing::{info, warn};

/// Split tree-diff output into paths, keeping git's order and dropping empty entries.
///
/// NUL-terminated output (`-z`) is split on NUL only, so names containing
/// quotes, backslashes or newlines survive intact. Otherwise the output is
/// split into lines.
pub fn parse_file_list(stdout: &[u8]) -> Vec<String> {
    let nul_terminated = stdout.contains(&0);
    let separator = if nul_terminated { b'\0' } else { b'\n' };

    stdout
        .split(|byte| *byte == separator)
        .map(|entry| {
            if nul_terminated {
                entry
            } else {
                entry.strip_suffix(b"\r").unwrap_or(entry)
            }
        })
        .filter(|entry| !entry.is_empty())
        .map(decode_path)
        .collect()
}

fn decode_path(entry: &[u8]) -> String {
    match std::str::from_utf8(entry) {
        Ok(path) => path.to_string(),
        Err(_) => {
            let lossy = String::from_utf8_lossy(entry).into_owned();
            warn!(
                "Path is not valid UTF-8 and may not be found or diffed: {}",
                lossy
            );
            lossy
        }
    }
}

/// Paths added, copied, modified or type-changed between two revisions
pub async fn fetch_changed_files<G: GitClient>(
    git: &G,
    old_revision: &str,
    young_revision: &str,
) -> ExportResult<Vec<String>> {
    let stdout = git.diff_tree(old_revision, young_revision).await?;
    let files = parse_file_list(&stdout);

    info!(
        "Found {} changed files between {} and {}",
        files.len(),
        old_revision,
        young_revision
    );

    Ok(files)
}
