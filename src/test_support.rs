use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Base commit time for test repositories; each later commit is one hour newer.
const BASE_EPOCH: i64 = 1_700_000_000;

/// A repository with a single commit on `main`.
pub(crate) fn create_test_repo() -> TempDir {
    create_test_repo_with_branches(&[])
}

/// A repository with `main` plus one branch per name, each forked from
/// `main` with its own `<name>.txt`. Commit times increase in the given
/// order, so branch listing order is `main` followed by `branches`.
pub(crate) fn create_test_repo_with_branches(branches: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"], 0);
    // Ensure the repo uses a deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"], 0);
    git(path, &["config", "user.email", "test@example.com"], 0);
    git(path, &["config", "user.name", "Test User"], 0);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."], 0);
    git(path, &["commit", "-m", "Initial commit"], 0);

    for (i, branch) in branches.iter().enumerate() {
        let offset = (i as i64 + 1) * 3600;
        git(path, &["checkout", "-q", "-b", branch, "main"], offset);
        std::fs::write(path.join(format!("{}.txt", branch)), format!("{}\n", branch)).unwrap();
        git(path, &["add", "."], offset);
        git(path, &["commit", "-m", &format!("Work on {}", branch)], offset);
        git(path, &["checkout", "-q", "main"], offset);
    }

    temp_dir
}

/// Lightweight tag on `main`, for checking that tags never stand in for branches.
pub(crate) fn create_tag(repo_dir: &Path, name: &str) {
    git(repo_dir, &["tag", name, "main"], 0);
}

fn git(repo_dir: &Path, args: &[&str], offset_secs: i64) {
    let date = format!("@{} +0000", BASE_EPOCH + offset_secs);
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}
