//! Implementation of the `git-dir config` command.

use super::Invocation;
use crate::cli::ConfigArgs;
use crate::error::Result;

/// Execute the `git-dir config` command.
pub fn cmd_config(invocation: &Invocation, args: ConfigArgs) -> Result<()> {
    print!("{}", effective_yaml(invocation, &args)?);
    Ok(())
}

/// The config file merged with the given flags, as YAML.
fn effective_yaml(invocation: &Invocation, args: &ConfigArgs) -> Result<String> {
    invocation.config(args.layout.overrides())?.to_yaml()
}
