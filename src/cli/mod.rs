//! CLI argument parsing for git-dir.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::Overrides;
use crate::naming::OrdinalPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// git-dir: export every local git branch into its own directory.
///
/// Each branch's tree is extracted into `git-dir/NN. <branch>`, numbered in
/// commit order so a directory listing follows branch history. `main` and
/// `master` keep their bare names unless `--no-prefix` says otherwise.
/// Running without a subcommand is the same as `git-dir export`.
#[derive(Parser, Debug)]
#[command(name = "git-dir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in DIR instead of the current directory.
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file (default: .git-dir.yaml in the working directory, if present).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for git-dir.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract every local branch into the output directory.
    ///
    /// Existing branch directories are updated in place: files from the
    /// branch are written, other files already there are left alone.
    Export(ExportArgs),

    /// Show the directory each branch would be exported to.
    ///
    /// Nothing is written to disk.
    Plan(PlanArgs),

    /// List every tracked file of a branch.
    Files(FilesArgs),

    /// Show the effective configuration as YAML.
    ///
    /// Merges `.git-dir.yaml` (or `--config`) with the given flags.
    Config(ConfigArgs),
}

/// Output layout flags shared by `export`, `plan` and `config`.
#[derive(Args, Debug, Default, Clone)]
pub struct LayoutArgs {
    /// Directory that receives one subdirectory per branch [default: git-dir].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Branch names (or `prefix*` patterns) to leave without an ordinal.
    /// Replaces the default of `main` and `master`.
    #[arg(short = 'n', long, value_delimiter = ',', value_name = "PATTERN")]
    pub no_prefix: Vec<String>,

    /// Do not prefix any branch (same as `--no-prefix '*'`).
    #[arg(long, conflicts_with = "no_prefix")]
    pub no_prefix_all: bool,

    /// First ordinal to assign [default: 1].
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub start: Option<u32>,

    /// Whether unprefixed branches still use up an ordinal.
    #[arg(long, value_enum)]
    pub ordinal_policy: Option<OrdinalPolicy>,
}

impl LayoutArgs {
    /// Config overrides for the flags that were given.
    pub fn overrides(&self) -> Overrides {
        let no_prefix = if self.no_prefix_all {
            Some(vec!["*".to_string()])
        } else if self.no_prefix.is_empty() {
            None
        } else {
            Some(self.no_prefix.clone())
        };

        Overrides {
            output_dir: self.output_dir.clone(),
            no_prefix,
            start_ordinal: self.start,
            ordinal_policy: self.ordinal_policy,
            manifest: false,
        }
    }
}

/// Arguments for the `export` command.
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Also list each branch's tracked files into the report.
    #[arg(long)]
    pub manifest: bool,

    /// Print the export report as JSON after the summary.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `plan` command.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Arguments for the `config` command.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Layout flags to merge over the config file.
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Arguments for the `files` command.
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Local branch to list.
    pub branch: String,
}
