//! Implementation of the `git-dir files` command.

use super::Invocation;
use crate::cli::FilesArgs;
use crate::context::RepoStatus;
use crate::error::{GitDirError, Result};
use crate::git::{BranchSource, GitCli};

/// Execute the `git-dir files` command: print every tracked path of a branch.
pub fn cmd_files(invocation: &Invocation, args: FilesArgs) -> Result<()> {
    for path in branch_files(invocation, &args.branch)? {
        println!("{}", path);
    }
    Ok(())
}

/// Tracked paths of `branch` in the repository at the working directory.
fn branch_files(invocation: &Invocation, branch: &str) -> Result<Vec<String>> {
    let RepoStatus::Found { root } = RepoStatus::detect_in(&invocation.cwd) else {
        return Err(GitDirError::UserError(format!(
            "cannot find a git repository in {}. Run this command from the repository root.",
            invocation.cwd.display()
        )));
    };

    GitCli::new(root).list_files(branch)
}
