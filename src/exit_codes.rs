//! Exit code constants for the git-dir CLI.
//!
//! - 0: Success (including runs where some branches failed to extract)
//! - 1: User error (bad args, invalid config, filesystem failure)
//! - 3: Git operation failure (branch listing, file listing)
//! - 4: Directory conflict (an ordinary file sits where a directory must go)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or I/O failure.
pub const USER_ERROR: i32 = 1;

/// Git operation failure: a git query needed to plan the export failed.
pub const GIT_FAILURE: i32 = 3;

/// A directory could not be created because an ordinary file has its name.
pub const DIRECTORY_CONFLICT: i32 = 4;
