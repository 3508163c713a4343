//! Config loading, validation, and command-line overrides.

use super::model::{Config, DEFAULT_CONFIG_FILE, NoPrefixSetting};
use crate::error::{GitDirError, Result};
use crate::naming::{OrdinalPolicy, validate_pattern};
use std::path::{Path, PathBuf};

/// Values given on the command line. `None` keeps the config file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub no_prefix: Option<Vec<String>>,
    pub start_ordinal: Option<u32>,
    pub ordinal_policy: Option<OrdinalPolicy>,
    pub manifest: bool,
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(GitDirError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GitDirError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GitDirError::UserError(format!("{} (in '{}')", e, path.display()))
        })
    }

    /// Load the config for a run.
    ///
    /// An explicit path must exist. Without one, `.git-dir.yaml` in `cwd` is
    /// used when present and defaults otherwise.
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(cwd.join(path)),
            None => {
                let default_path = cwd.join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading config file");
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| GitDirError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            GitDirError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `output_dir` must be non-empty
    /// - `start_ordinal` must be at least 1
    /// - `no_prefix` patterns may only use a single trailing `*`
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(GitDirError::UserError(
                "config validation failed: output_dir must not be empty".to_string(),
            ));
        }

        if self.start_ordinal == 0 {
            return Err(GitDirError::UserError(
                "config validation failed: start_ordinal must be greater than 0".to_string(),
            ));
        }

        if let Some(setting) = &self.no_prefix {
            for pattern in setting.patterns() {
                validate_pattern(&pattern).map_err(|e| {
                    GitDirError::UserError(format!("config validation failed: {}", e))
                })?;
            }
        }

        Ok(())
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(patterns) = overrides.no_prefix {
            self.no_prefix = Some(NoPrefixSetting::Many(patterns));
        }
        if let Some(start) = overrides.start_ordinal {
            self.start_ordinal = start;
        }
        if let Some(policy) = overrides.ordinal_policy {
            self.ordinal_policy = policy;
        }
        self.manifest |= overrides.manifest;

        self.validate()?;
        Ok(self)
    }
}
