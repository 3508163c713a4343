//! The branch exporter.
//!
//! `initialize` finds the repository and reads the branch list once;
//! `export` then walks that list in order, giving each branch a directory
//! under the output directory and overlaying the branch tree onto it.
//!
//! # Failure handling
//!
//! - No repository: reported at initialization, `export` becomes a no-op.
//! - A directory that cannot be created aborts the whole run.
//! - A failed extraction is recorded for that branch and the run continues.

use crate::config::Config;
use crate::context::RepoStatus;
use crate::error::{GitDirError, Result};
use crate::fs::{DirStatus, ensure_dir};
use crate::git::{Branch, BranchSource, GitCli};
use crate::naming::{ExclusionSpec, OrdinalAllocator, OrdinalPolicy, PlanEntry, build_plan};
use crate::report::{BranchResult, ExportReport};
use std::path::{Path, PathBuf};

/// Per-call export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub exclusion: ExclusionSpec,
    pub start_ordinal: u32,
    pub ordinal_policy: OrdinalPolicy,
    /// List each branch's tracked files into the report.
    pub manifest: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            exclusion: ExclusionSpec::Default,
            start_ordinal: 1,
            ordinal_policy: OrdinalPolicy::Compact,
            manifest: false,
        }
    }
}

impl From<&Config> for ExportOptions {
    fn from(config: &Config) -> Self {
        Self {
            exclusion: config.exclusion_spec(),
            start_ordinal: config.start_ordinal,
            ordinal_policy: config.ordinal_policy,
            manifest: config.manifest,
        }
    }
}

#[derive(Debug)]
struct Ready<S> {
    source: S,
    branches: Vec<Branch>,
}

/// Exports every local branch into its own subdirectory.
#[derive(Debug)]
pub struct BranchExporter<S> {
    /// Output directory resolved against the working directory.
    output_dir: PathBuf,
    /// Output directory as configured, for messages.
    display_dir: PathBuf,
    ready: Option<Ready<S>>,
}

impl BranchExporter<GitCli> {
    /// Initialize against the `git` executable.
    pub fn open(cwd: &Path, output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::initialize(cwd, output_dir, |root| GitCli::new(root))
    }
}

impl<S: BranchSource> BranchExporter<S> {
    /// Detect the repository in `cwd` and read its branch list.
    ///
    /// A missing repository is not an error: a diagnostic is printed and the
    /// returned exporter reports `is_ready() == false`. `open` is only called
    /// when a repository is present.
    pub fn initialize<F>(cwd: &Path, output_dir: impl AsRef<Path>, open: F) -> Result<Self>
    where
        F: FnOnce(&Path) -> S,
    {
        let display_dir = output_dir.as_ref().to_path_buf();
        let output_dir = cwd.join(&display_dir);

        let ready = match RepoStatus::detect_in(cwd) {
            RepoStatus::NotFound { cwd } => {
                println!(
                    "\nCannot find a git repository in the current dir {}",
                    cwd.display()
                );
                println!("Stop\n");
                None
            }
            RepoStatus::Found { root } => {
                let source = open(&root);
                let branches = source.list_branches()?;
                tracing::debug!(count = branches.len(), "listed local branches");
                Some(Ready { source, branches })
            }
        };

        Ok(Self {
            output_dir,
            display_dir,
            ready,
        })
    }

    /// Whether a repository was found.
    pub fn is_ready(&self) -> bool {
        self.ready.is_some()
    }

    /// Branches in export order, oldest first. Empty when not ready.
    pub fn branches(&self) -> &[Branch] {
        self.ready
            .as_ref()
            .map(|r| r.branches.as_slice())
            .unwrap_or_default()
    }

    /// Directory names `export` would use, without touching the filesystem.
    pub fn plan(&self, options: &ExportOptions) -> Result<Vec<PlanEntry>> {
        let rules = options.exclusion.resolve()?;
        Ok(build_plan(
            self.branches().iter().map(|b| b.name.as_str()),
            rules,
            options.start_ordinal,
            options.ordinal_policy,
        ))
    }

    /// Export every branch. Returns `Ok(None)` when no repository was found.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(report))` - All branches were processed; check
    ///   `report.all_succeeded()` for per-branch extraction failures
    /// * `Err(GitDirError::DirectoryConflict)` - An ordinary file blocks a directory
    /// * `Err(GitDirError::Io)` - A directory could not be created
    /// * `Err(GitDirError::UserError)` - Invalid exclusion pattern
    pub fn export(&self, options: &ExportOptions) -> Result<Option<ExportReport>> {
        let Some(ready) = &self.ready else {
            return Ok(None);
        };

        let rules = options.exclusion.resolve()?;
        let mut allocator =
            OrdinalAllocator::new(rules, options.start_ordinal, options.ordinal_policy);

        println!("Create/update directory: {}", self.display_dir.display());
        self.ensure(&self.output_dir)?;

        let mut report = ExportReport::new(&self.display_dir);
        for branch in &ready.branches {
            let entry = allocator.assign(&branch.name);
            let result = self.export_branch(&ready.source, entry, options.manifest)?;
            report.record(result);
        }

        for line in report.summary_lines(&self.dir_label()) {
            println!("{}", line);
        }
        Ok(Some(report))
    }

    fn export_branch(&self, source: &S, entry: PlanEntry, manifest: bool) -> Result<BranchResult> {
        let target = self.output_dir.join(&entry.dir_name);
        let shown = self.display_dir.join(&entry.dir_name);

        let dir_status = self.ensure(&target)?;
        match dir_status {
            DirStatus::Existing => println!("Update subdirectory: {}", shown.display()),
            DirStatus::Created => println!("Create subdirectory: {}", shown.display()),
        }

        let files = if manifest {
            Some(source.list_files(&entry.branch)?)
        } else {
            None
        };

        let failure = source.extract_tree(&entry.branch, &target).err();
        if let Some(failure) = &failure {
            println!(
                "  *** problem with copy files from branch {} -- res: {}",
                entry.branch, failure
            );
        }

        Ok(BranchResult {
            branch: entry.branch,
            target: shown,
            ordinal: entry.ordinal,
            dir_status,
            files,
            failure,
        })
    }

    fn ensure(&self, dir: &Path) -> Result<DirStatus> {
        ensure_dir(dir).inspect_err(|e| {
            if let GitDirError::DirectoryConflict { path } = e {
                println!(
                    "***Error: name {} is in use for the ordinary file\n",
                    path.display()
                );
            }
        })
    }

    /// `./git-dir/` for relative output directories, the path itself otherwise.
    fn dir_label(&self) -> String {
        if self.display_dir.is_relative() {
            format!("./{}/", self.display_dir.display())
        } else {
            format!("{}/", self.display_dir.display())
        }
    }
}
