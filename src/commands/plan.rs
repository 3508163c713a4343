//! Implementation of the `git-dir plan` command.

use super::{Invocation, display_path};
use crate::cli::PlanArgs;
use crate::error::Result;
use crate::export::{BranchExporter, ExportOptions};

/// Execute the `git-dir plan` command.
pub fn cmd_plan(invocation: &Invocation, args: PlanArgs) -> Result<()> {
    for line in plan_lines(invocation, &args)? {
        println!("{}", line);
    }
    Ok(())
}

/// Render the plan: one line per branch with ordinal (or `--`), target
/// directory and the branch tip's commit time. Empty outside a repository.
fn plan_lines(invocation: &Invocation, args: &PlanArgs) -> Result<Vec<String>> {
    let config = invocation.config(args.layout.overrides())?;
    let exporter = BranchExporter::open(&invocation.cwd, &config.output_dir)?;
    if !exporter.is_ready() {
        return Ok(Vec::new());
    }

    let plan = exporter.plan(&ExportOptions::from(&config))?;

    let mut lines = vec![
        format!("Export plan for {}", display_path(&config.output_dir)),
        String::new(),
    ];
    for (entry, branch) in plan.iter().zip(exporter.branches()) {
        let ordinal = entry
            .ordinal
            .map(|n| format!("{:02}", n))
            .unwrap_or_else(|| "--".to_string());
        let committed = branch
            .committed_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        lines.push(format!(
            "  {:>4}  {:<40} {}",
            ordinal,
            display_path(&config.output_dir.join(&entry.dir_name)),
            committed
        ));
    }
    lines.push(String::new());
    lines.push(format!("{} branch(es)", plan.len()));
    Ok(lines)
}
