//! Repository detection for git-dir.
//!
//! The exporter works on the repository whose metadata sits directly in the
//! working directory: a `.git` directory, or the `.git` file a linked worktree
//! uses to point at its real git dir. Subdirectories of a repository are not
//! searched upward, so the output directory always lands next to `.git`.

use crate::error::{GitDirError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the repository metadata entry.
pub const GIT_METADATA: &str = ".git";

/// Result of looking for a repository in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoStatus {
    /// Repository metadata is present; `root` is the working directory.
    Found { root: PathBuf },
    /// No repository metadata in `cwd`.
    NotFound { cwd: PathBuf },
}

impl RepoStatus {
    /// Detect a repository in a specific directory.
    pub fn detect_in<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref();
        let metadata = cwd.join(GIT_METADATA);

        if metadata.is_dir() || metadata.is_file() {
            RepoStatus::Found {
                root: cwd.to_path_buf(),
            }
        } else {
            RepoStatus::NotFound {
                cwd: cwd.to_path_buf(),
            }
        }
    }
}

/// Resolve the working directory: an explicit `-C` path, or the process cwd.
pub fn resolve_cwd(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| {
        GitDirError::UserError(format!("failed to get current working directory: {}", e))
    })?;
    match explicit {
        Some(dir) => {
            let dir = cwd.join(dir);
            if !dir.is_dir() {
                return Err(GitDirError::UserError(format!(
                    "working directory '{}' does not exist",
                    dir.display()
                )));
            }
            Ok(dir)
        }
        None => Ok(cwd),
    }
}
