//! Configuration for git-dir.
//!
//! Settings come from an optional `.git-dir.yaml` in the working directory
//! (or an explicit `--config` file), then command-line flags override them.
//! YAML parsing is forward-compatible: unknown fields are ignored.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::{Config, NoPrefixSetting};
pub use operations::Overrides;
