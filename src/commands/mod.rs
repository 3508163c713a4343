//! Command implementations for git-dir.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. A missing subcommand runs `export` with default flags.

mod config;
mod export;
mod files;
mod plan;

use crate::cli::{Cli, Command, ExportArgs};
use crate::config::{Config, Overrides};
use crate::context::resolve_cwd;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Settings every command resolves before running.
pub(crate) struct Invocation {
    pub cwd: PathBuf,
    config_path: Option<PathBuf>,
}

impl Invocation {
    /// Load the config file for this working directory and apply `overrides`.
    pub fn config(&self, overrides: Overrides) -> Result<Config> {
        Config::discover(&self.cwd, self.config_path.as_deref())?.with_overrides(overrides)
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution.
pub fn dispatch(cli: Cli) -> Result<()> {
    let invocation = Invocation {
        cwd: resolve_cwd(cli.dir.as_deref())?,
        config_path: cli.config,
    };
    tracing::debug!(cwd = %invocation.cwd.display(), "resolved working directory");

    match cli.command {
        None => export::cmd_export(&invocation, ExportArgs::default()),
        Some(Command::Export(args)) => export::cmd_export(&invocation, args),
        Some(Command::Plan(args)) => plan::cmd_plan(&invocation, args),
        Some(Command::Files(args)) => files::cmd_files(&invocation, args),
        Some(Command::Config(args)) => config::cmd_config(&invocation, args),
    }
}

/// Output directory as a user-facing string.
pub(crate) fn display_path(path: &Path) -> String {
    path.display().to_string()
}
