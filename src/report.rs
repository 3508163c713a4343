//! Outcome of an export run.
//!
//! The report is built incrementally by the exporter, one [`BranchResult`] per
//! branch, and rendered once at the end as a human-readable summary and,
//! optionally, JSON.

use crate::archive::ExtractFailure;
use crate::error::{GitDirError, Result};
use crate::fs::DirStatus;
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchResult {
    pub branch: String,
    pub target: PathBuf,
    pub ordinal: Option<u32>,
    pub dir_status: DirStatus,
    /// Tracked files of the branch, when a manifest was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// `None` when the tree was extracted successfully.
    pub failure: Option<ExtractFailure>,
}

impl BranchResult {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Aggregate outcome of one export call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub branches: Vec<BranchResult>,
}

impl ExportReport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            branches: Vec::new(),
        }
    }

    pub fn record(&mut self, result: BranchResult) {
        self.branches.push(result);
    }

    /// True when every branch was copied without error.
    pub fn all_succeeded(&self) -> bool {
        self.branches.iter().all(BranchResult::is_success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &BranchResult> {
        self.branches.iter().filter(|r| !r.is_success())
    }

    /// Summary lines printed after the last branch. `dir_label` names the
    /// output directory as the user should see it (`./git-dir/`).
    pub fn summary_lines(&self, dir_label: &str) -> Vec<String> {
        let mut lines = Vec::new();
        if self.all_succeeded() {
            lines.push(format!(
                "Done: Copied content of git branches into subdirectories of {}",
                dir_label
            ));
        } else {
            lines.push(format!(
                "There was a problem with copy of content of git branches into subdirectories of {}",
                dir_label
            ));
            for result in self.failed() {
                if let Some(failure) = &result.failure {
                    lines.push(format!("  failed: {} -- res: {}", result.branch, failure));
                }
            }
        }

        let copied = self.branches.iter().filter(|r| r.is_success()).count();
        lines.push(format!(
            "{} of {} branch(es) copied",
            copied,
            self.branches.len()
        ));
        lines
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GitDirError::UserError(format!("failed to serialize export report: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::PipelineStage;

    fn result(branch: &str, failure: Option<ExtractFailure>) -> BranchResult {
        BranchResult {
            branch: branch.to_string(),
            target: PathBuf::from("git-dir").join(branch),
            ordinal: None,
            dir_status: DirStatus::Created,
            files: None,
            failure,
        }
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = ExportReport::new("git-dir");
        assert!(report.all_succeeded());
        assert_eq!(
            report.summary_lines("./git-dir/"),
            vec![
                "Done: Copied content of git branches into subdirectories of ./git-dir/",
                "0 of 0 branch(es) copied",
            ]
        );
    }

    #[test]
    fn test_summary_names_failed_branch() {
        let mut report = ExportReport::new("git-dir");
        report.record(result("main", None));
        report.record(result(
            "broken",
            Some(ExtractFailure::new(PipelineStage::Unpack, Some(2), "")),
        ));
        report.record(result("dev", None));

        assert!(!report.all_succeeded());
        let failed: Vec<_> = report.failed().map(|r| r.branch.as_str()).collect();
        assert_eq!(failed, vec!["broken"]);

        let lines = report.summary_lines("./git-dir/");
        assert!(lines[0].starts_with("There was a problem"));
        assert_eq!(lines[1], "  failed: broken -- res: tar exited with 2");
        assert_eq!(lines[2], "2 of 3 branch(es) copied");
    }

    #[test]
    fn test_json_report_shape() {
        let mut report = ExportReport::new("git-dir");
        report.record(BranchResult {
            files: Some(vec!["README.md".to_string()]),
            ordinal: Some(1),
            ..result("feature", None)
        });

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let branch = &json["branches"][0];
        assert_eq!(branch["branch"], "feature");
        assert_eq!(branch["ordinal"], 1);
        assert_eq!(branch["dir_status"], "created");
        assert_eq!(branch["files"][0], "README.md");
        assert!(branch["failure"].is_null());
    }
}
