//! Git command runner for git-dir.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling, plus the [`BranchSource`] seam through which the
//! exporter reaches the repository. All git operations go through this module.

use crate::archive::{self, ExtractResult};
use crate::error::{GitDirError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Marker `git branch` puts in front of the checked-out branch.
const CURRENT_BRANCH_MARKER: &str = "*";

/// `for-each-ref` format: branch name and ISO-8601 tip commit time, NUL separated.
///
/// `lstrip=2` drops `refs/heads/` as-is. `refname:short` would print
/// `heads/<name>` whenever a tag shares the branch name.
const BRANCH_FORMAT: &str = "--format=%(refname:lstrip=2)%00%(committerdate:iso-strict)";

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trailing newlines removed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout)
                .trim_end_matches('\n')
                .to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(GitDirError::GitError)` - On spawn failure or non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    tracing::debug!(cwd = %cwd.display(), args = ?args, "running git");

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            GitDirError::GitError(format!(
                "failed to execute git {}: {} (is git installed?)",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(GitDirError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// A local branch and the commit time of its tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
    /// Committer date of the tip commit. `None` when the listing did not carry one.
    pub committed_at: Option<DateTime<FixedOffset>>,
}

/// Parse a branch listing into branches ordered oldest tip first.
///
/// Accepts both the `for-each-ref` format used by [`GitCli`] (`name\0date`)
/// and plain `git branch` output, where the checked-out branch carries a
/// leading `*` marker. The marker is stripped, blank lines and duplicate
/// names are dropped. The sort is stable, so branches with equal (or missing)
/// timestamps keep their listing order.
pub fn parse_branch_list(listing: &str) -> Result<Vec<Branch>> {
    let mut seen = HashSet::new();
    let mut branches = Vec::new();

    for line in listing.lines() {
        let (name, date) = match line.split_once('\0') {
            Some((name, date)) => (name, Some(date.trim())),
            None => (line, None),
        };

        let name = name.trim();
        let name = name
            .strip_prefix(CURRENT_BRANCH_MARKER)
            .map(str::trim_start)
            .unwrap_or(name);
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }

        let committed_at = match date {
            Some(date) if !date.is_empty() => {
                Some(DateTime::parse_from_rfc3339(date).map_err(|e| {
                    GitDirError::GitError(format!(
                        "unexpected commit date '{}' for branch '{}': {}",
                        date, name, e
                    ))
                })?)
            }
            _ => None,
        };

        branches.push(Branch {
            name: name.to_string(),
            committed_at,
        });
    }

    branches.sort_by(|a, b| a.committed_at.cmp(&b.committed_at));
    Ok(branches)
}

/// Parse NUL-separated `ls-tree -z --name-only` output.
fn parse_file_list(listing: &str) -> Vec<String> {
    listing
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}

/// The three repository capabilities the exporter depends on.
pub trait BranchSource {
    /// Local branches, oldest tip commit first.
    fn list_branches(&self) -> Result<Vec<Branch>>;

    /// Every tracked file path of a branch.
    fn list_files(&self, branch: &str) -> Result<Vec<String>>;

    /// Overlay the branch's complete tree onto `dest`.
    ///
    /// Failure here is per-branch and never aborts an export.
    fn extract_tree(&self, branch: &str, dest: &Path) -> ExtractResult;
}

/// [`BranchSource`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

/// Fully qualified ref for a local branch, so names never resolve to tags or paths.
fn local_ref(branch: &str) -> String {
    format!("refs/heads/{}", branch)
}

impl BranchSource for GitCli {
    fn list_branches(&self) -> Result<Vec<Branch>> {
        let output = run_git(
            &self.repo_root,
            &[
                "for-each-ref",
                "--sort=committerdate",
                BRANCH_FORMAT,
                "refs/heads/",
            ],
        )?;
        parse_branch_list(&output.stdout)
    }

    fn list_files(&self, branch: &str) -> Result<Vec<String>> {
        let reference = local_ref(branch);
        let output = run_git(
            &self.repo_root,
            &["ls-tree", "-r", "-z", "--name-only", &reference],
        )
        .map_err(|e| {
            GitDirError::GitError(format!("failed to list files of branch '{}': {}", branch, e))
        })?;
        Ok(parse_file_list(&output.stdout))
    }

    fn extract_tree(&self, branch: &str, dest: &Path) -> ExtractResult {
        archive::extract_ref(&self.repo_root, &local_ref(branch), dest)
    }
}
