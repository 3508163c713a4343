//! Config struct definition and default implementation.

use crate::naming::{ExclusionSpec, OrdinalPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".git-dir.yaml";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "git-dir";

/// `no_prefix` accepts either one pattern or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoPrefixSetting {
    One(String),
    Many(Vec<String>),
}

impl NoPrefixSetting {
    pub fn patterns(&self) -> Vec<String> {
        match self {
            NoPrefixSetting::One(pattern) => vec![pattern.clone()],
            NoPrefixSetting::Many(patterns) => patterns.clone(),
        }
    }
}

/// Configuration for an export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that receives one subdirectory per branch (default: "git-dir").
    pub output_dir: PathBuf,

    /// Branches exempt from ordinal prefixing. Unset means `main` and `master`;
    /// `"*"` disables prefixing entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_prefix: Option<NoPrefixSetting>,

    /// First ordinal handed out (default: 1).
    pub start_ordinal: u32,

    /// Whether excluded branches consume an ordinal.
    pub ordinal_policy: OrdinalPolicy,

    /// Record each branch's tracked files in the export report.
    pub manifest: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            no_prefix: None,
            start_ordinal: 1,
            ordinal_policy: OrdinalPolicy::default(),
            manifest: false,
        }
    }
}

impl Config {
    /// The exclusion spec this config describes.
    pub fn exclusion_spec(&self) -> ExclusionSpec {
        match &self.no_prefix {
            None => ExclusionSpec::Default,
            Some(setting) => ExclusionSpec::from_patterns(setting.patterns()),
        }
    }
}
