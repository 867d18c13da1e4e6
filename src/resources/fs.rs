//! File-system resource helpers.
use std::path::Path;

use crate::error::FileError;
use crate::operations::FileSystemOps;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`FileError::CreateDir`] if the directory cannot be created.
pub fn ensure_parent_dir(fs: &dyn FileSystemOps, path: &Path) -> Result<(), FileError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(fs, parent),
        _ => Ok(()),
    }
}

/// Ensure `dir` exists, creating it (and any ancestors) if necessary.
///
/// # Errors
///
/// Returns [`FileError::CreateDir`] if the directory cannot be created.
pub fn ensure_dir(fs: &dyn FileSystemOps, dir: &Path) -> Result<(), FileError> {
    if fs.exists(dir) {
        return Ok(());
    }
    fs.create_dir_all(dir).map_err(|source| FileError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
