use crate::error::{ExportError, ExportResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Join a git-style relative path (always `/`-separated) onto `root`
/// using the platform's own separator.
pub fn join_relative<P: AsRef<Path>>(root: P, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|component| !component.is_empty())
        .fold(root.as_ref().to_path_buf(), |path, component| {
            path.join(component)
        })
}

/// Create every missing directory above `path`. Idempotent.
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> ExportResult<()> {
    let Some(parent) = path.as_ref().parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

/// Copy `source` over `destination` if the source is a regular file.
/// Returns `Ok(false)` when there is nothing to copy.
pub fn copy_file_overwrite<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> ExportResult<bool> {
    let src_path = source.as_ref();
    let dest_path = destination.as_ref();

    if !src_path.is_file() {
        return Ok(false);
    }

    fs::copy(src_path, dest_path).map_err(|source| ExportError::Write {
        path: dest_path.to_path_buf(),
        source,
    })?;

    Ok(true)
}

/// Replace the contents of `destination` with `contents`
pub fn write_file_overwrite<P: AsRef<Path>>(destination: P, contents: &[u8]) -> ExportResult<()> {
    let dest_path = destination.as_ref();
    fs::write(dest_path, contents).map_err(|source| ExportError::Write {
        path: dest_path.to_path_buf(),
        source,
    })
}
