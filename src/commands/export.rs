//! Implementation of the `git-dir export` command.

use super::Invocation;
use crate::cli::ExportArgs;
use crate::error::Result;
use crate::export::{BranchExporter, ExportOptions};

/// Execute the `git-dir export` command.
///
/// Partial failures are reported in the summary but still return `Ok(())`:
/// only aborted runs produce a non-zero exit code.
pub fn cmd_export(invocation: &Invocation, args: ExportArgs) -> Result<()> {
    let mut overrides = args.layout.overrides();
    overrides.manifest = args.manifest;
    let config = invocation.config(overrides)?;

    let exporter = BranchExporter::open(&invocation.cwd, &config.output_dir)?;
    let Some(report) = exporter.export(&ExportOptions::from(&config))? else {
        return Ok(());
    };

    if config.manifest && !args.json {
        for result in &report.branches {
            if let Some(files) = &result.files {
                println!("  {}: {} file(s)", result.branch, files.len());
            }
        }
    }

    if args.json {
        println!("{}", report.to_json()?);
    }
    Ok(())
}
