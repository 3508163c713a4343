//! Tree extraction through a `git archive | tar -x` pipeline.
//!
//! The archive is streamed from git's stdout straight into tar's stdin, so no
//! intermediate file is written. Extraction overlays the destination: files in
//! the branch are created or overwritten, anything else already in the
//! directory is left alone.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

/// Which half of the pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// `git archive`
    Archive,
    /// `tar -x`
    Unpack,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Archive => write!(f, "git archive"),
            PipelineStage::Unpack => write!(f, "tar"),
        }
    }
}

/// A failed extraction of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractFailure {
    pub stage: PipelineStage,
    /// Exit status code; `None` if the process could not start or was killed by a signal.
    pub code: Option<i32>,
    pub message: String,
}

impl ExtractFailure {
    pub fn new(stage: PipelineStage, code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            stage,
            code,
            message: message.into(),
        }
    }

    /// Append an upstream failure to the message, keeping this stage and code.
    pub fn caused_by(mut self, cause: &ExtractFailure) -> Self {
        self.message = if self.message.is_empty() {
            format!("after {}", cause)
        } else {
            format!("{} (after {})", self.message, cause)
        };
        self
    }

    fn spawn(stage: PipelineStage, err: io::Error) -> Self {
        Self::new(stage, None, format!("failed to start: {}", err))
    }

    fn wait(stage: PipelineStage, err: io::Error) -> Self {
        Self::new(stage, None, format!("failed to wait for process: {}", err))
    }
}

impl fmt::Display for ExtractFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} exited with {}", self.stage, code)?,
            None => write!(f, "{} did not complete", self.stage)?,
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Outcome of a single tree extraction.
pub type ExtractResult = std::result::Result<(), ExtractFailure>;

/// Extract the tree at `reference` into `dest`.
///
/// Both processes are always reaped before returning. When both fail the
/// unpack failure is reported, matching the exit status of a shell pipeline,
/// and git's error is appended to its message.
pub fn extract_ref(repo_root: &Path, reference: &str, dest: &Path) -> ExtractResult {
    tracing::debug!(
        repo = %repo_root.display(),
        reference,
        dest = %dest.display(),
        "extracting tree"
    );

    let mut archive = Command::new("git")
        .current_dir(repo_root)
        .args(["archive", "--format=tar", reference])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ExtractFailure::spawn(PipelineStage::Archive, e))?;

    let Some(archive_stdout) = archive.stdout.take() else {
        reap(&mut archive);
        return Err(ExtractFailure::new(
            PipelineStage::Archive,
            None,
            "archive output was not captured",
        ));
    };

    let unpack = Command::new("tar")
        .arg("-x")
        .arg("-C")
        .arg(dest)
        .stdin(Stdio::from(archive_stdout))
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn();

    let unpack = match unpack {
        Ok(child) => child,
        Err(e) => {
            reap(&mut archive);
            return Err(ExtractFailure::spawn(PipelineStage::Unpack, e));
        }
    };

    let unpack_output = unpack.wait_with_output();
    let archive_output = archive.wait_with_output();

    let unpack_output = unpack_output.map_err(|e| ExtractFailure::wait(PipelineStage::Unpack, e))?;
    let archive_result = archive_output
        .map_err(|e| ExtractFailure::wait(PipelineStage::Archive, e))
        .and_then(|out| check_status(PipelineStage::Archive, out.status, &out.stderr));

    match check_status(PipelineStage::Unpack, unpack_output.status, &unpack_output.stderr) {
        Ok(()) => archive_result,
        Err(failure) => match archive_result {
            Ok(()) => Err(failure),
            Err(cause) => Err(failure.caused_by(&cause)),
        },
    }
}

fn check_status(stage: PipelineStage, status: ExitStatus, stderr: &[u8]) -> ExtractResult {
    if status.success() {
        return Ok(());
    }
    let message = String::from_utf8_lossy(stderr).trim().to_string();
    tracing::debug!(%stage, code = ?status.code(), %message, "pipeline stage failed");
    Err(ExtractFailure::new(stage, status.code(), message))
}

/// Kill and wait for a child that will never be read from.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_repo_with_branches;
    use tempfile::TempDir;

    #[test]
    fn test_extract_ref_writes_branch_tree() {
        let repo = create_test_repo_with_branches(&["feature-x"]);
        let dest = TempDir::new().unwrap();

        extract_ref(repo.path(), "refs/heads/feature-x", dest.path()).unwrap();

        assert!(dest.path().join("README.md").is_file());
        assert!(dest.path().join("feature-x.txt").is_file());
    }

    #[test]
    fn test_extract_ref_overlays_existing_content() {
        let repo = create_test_repo_with_branches(&[]);
        let dest = TempDir::new().unwrap();
        std::fs::write(dest.path().join("README.md"), "stale\n").unwrap();
        std::fs::write(dest.path().join("keep.txt"), "untouched\n").unwrap();

        extract_ref(repo.path(), "refs/heads/main", dest.path()).unwrap();

        let readme = std::fs::read_to_string(dest.path().join("README.md")).unwrap();
        assert_eq!(readme, "# Test\n");
        let kept = std::fs::read_to_string(dest.path().join("keep.txt")).unwrap();
        assert_eq!(kept, "untouched\n");
    }

    #[test]
    fn test_extract_ref_unknown_reference_fails() {
        let repo = create_test_repo_with_branches(&[]);
        let dest = TempDir::new().unwrap();

        let failure = extract_ref(repo.path(), "refs/heads/missing", dest.path()).unwrap_err();

        // Depending on the tar build the empty stream may or may not fail too;
        // git's complaint about the ref is in the message either way.
        assert!(failure.code.is_some());
        let message = failure.to_string().to_lowercase();
        assert!(message.contains("not a valid object name"), "{}", message);
        if failure.stage == PipelineStage::Unpack {
            assert!(message.contains("after git archive exited with"), "{}", message);
        }
    }

    #[test]
    fn test_unpack_failure_keeps_archive_cause() {
        let archive = ExtractFailure::new(
            PipelineStage::Archive,
            Some(128),
            "fatal: not a valid object name: refs/heads/heads/main",
        );
        let failure = ExtractFailure::new(
            PipelineStage::Unpack,
            Some(2),
            "tar: This does not look like a tar archive",
        )
        .caused_by(&archive);

        assert_eq!(failure.stage, PipelineStage::Unpack);
        assert_eq!(failure.code, Some(2));
        assert_eq!(
            failure.to_string(),
            "tar exited with 2: tar: This does not look like a tar archive \
             (after git archive exited with 128: fatal: not a valid object name: refs/heads/heads/main)"
        );

        let bare = ExtractFailure::new(PipelineStage::Unpack, Some(2), "").caused_by(&archive);
        assert!(bare.to_string().starts_with("tar exited with 2: after git archive exited with 128"));
    }

    #[test]
    fn test_extract_failure_display() {
        let failure = ExtractFailure::new(PipelineStage::Archive, Some(128), "fatal: bad ref");
        assert_eq!(failure.to_string(), "git archive exited with 128: fatal: bad ref");

        let failure = ExtractFailure::new(PipelineStage::Unpack, None, "");
        assert_eq!(failure.to_string(), "tar did not complete");
    }
}
