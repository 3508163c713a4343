//! Filesystem utilities for git-dir.
//!
//! The only filesystem state this tool owns is the output tree, so the only
//! helper needed is idempotent directory creation that tells an ordinary file
//! in the way apart from every other failure.

use crate::error::{GitDirError, Result};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Whether [`ensure_dir`] had to create the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirStatus {
    Created,
    Existing,
}

/// Ensure `path` exists as a directory, creating missing parents.
///
/// # Returns
///
/// * `Ok(DirStatus::Existing)` - The directory was already there
/// * `Ok(DirStatus::Created)` - The directory (and any parents) were created
/// * `Err(GitDirError::DirectoryConflict)` - `path` or one of its ancestors is
///   an ordinary file
/// * `Err(GitDirError::Io)` - Any other failure (permissions, I/O)
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<DirStatus> {
    let path = path.as_ref();

    if path.is_dir() {
        return Ok(DirStatus::Existing);
    }
    if let Some(blocker) = find_non_directory(path) {
        return Err(conflict(blocker));
    }

    match fs::create_dir_all(path) {
        Ok(()) => Ok(DirStatus::Created),
        Err(e) => {
            // Lost a race with something that created a file under our feet.
            if let Some(blocker) = find_non_directory(path) {
                return Err(conflict(blocker));
            }
            if e.kind() == ErrorKind::AlreadyExists && path.is_dir() {
                return Ok(DirStatus::Existing);
            }
            Err(GitDirError::io("failed to create directory", path, e))
        }
    }
}

/// The nearest path among `path` and its ancestors that exists but is not a directory.
fn find_non_directory(path: &Path) -> Option<&Path> {
    path.ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .find(|p| p.symlink_metadata().is_ok() && !p.is_dir())
}

fn conflict(path: &Path) -> GitDirError {
    GitDirError::DirectoryConflict {
        path: path.to_path_buf(),
    }
}
