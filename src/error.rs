//! Error types for the git-dir CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for git-dir operations.
///
/// Per-branch extraction failures are not errors: they are recorded in the
/// export report and the run continues. Everything here aborts the run.
#[derive(Error, Debug)]
pub enum GitDirError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// A directory was requested where an ordinary file already exists.
    #[error(
        "Cannot create/use directory {}: this name is in use for ordinary file",
        .path.display()
    )]
    DirectoryConflict {
        /// The path that exists as a non-directory.
        path: PathBuf,
    },

    /// Any other filesystem failure.
    #[error("{context} '{}': {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GitDirError {
    /// Build a [`GitDirError::Io`] from a short description, a path and the cause.
    pub fn io(context: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GitDirError::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitDirError::UserError(_) => exit_codes::USER_ERROR,
            GitDirError::GitError(_) => exit_codes::GIT_FAILURE,
            GitDirError::DirectoryConflict { .. } => exit_codes::DIRECTORY_CONFLICT,
            GitDirError::Io { .. } => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for git-dir operations.
pub type Result<T> = std::result::Result<T, GitDirError>;
