//! Directory naming for exported branches.
//!
//! Branches are exported into `"{ordinal:02}. {branch}"` so a plain
//! alphabetical listing of the output directory follows branch commit order.
//! Branches matched by the exclusion spec keep their bare name.

use crate::error::{GitDirError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Branch names left unprefixed when nothing else is configured.
pub const DEFAULT_NO_PREFIX: &[&str] = &["main", "master"];

const WILDCARD: char = '*';

/// Which branch names are exempt from ordinal prefixing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExclusionSpec {
    /// The conventional primary branch names ([`DEFAULT_NO_PREFIX`]).
    #[default]
    Default,
    /// Exact branch names only.
    ExactNames(Vec<String>),
    /// A mix of exact names and `prefix*` patterns.
    Patterns(Vec<String>),
    /// No branch gets a prefix.
    ExcludeAll,
}

impl ExclusionSpec {
    /// Classify a list of user-supplied patterns.
    ///
    /// A bare `*` anywhere in the list means [`ExclusionSpec::ExcludeAll`]. An
    /// empty list is an explicit "prefix everything" and stays `ExactNames(vec![])`.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();

        if patterns.iter().any(|p| p == "*") {
            ExclusionSpec::ExcludeAll
        } else if patterns.iter().any(|p| p.contains(WILDCARD)) {
            ExclusionSpec::Patterns(patterns)
        } else {
            ExclusionSpec::ExactNames(patterns)
        }
    }

    /// Resolve into the two plain match sets used during export.
    pub fn resolve(&self) -> Result<NoPrefixRules> {
        match self {
            ExclusionSpec::Default => NoPrefixRules::from_patterns(DEFAULT_NO_PREFIX.iter().copied()),
            ExclusionSpec::ExactNames(names) => Ok(NoPrefixRules {
                exact: names.iter().cloned().collect(),
                ..NoPrefixRules::default()
            }),
            ExclusionSpec::Patterns(patterns) => {
                NoPrefixRules::from_patterns(patterns.iter().map(String::as_str))
            }
            ExclusionSpec::ExcludeAll => Ok(NoPrefixRules {
                all: true,
                ..NoPrefixRules::default()
            }),
        }
    }
}

/// Check that a pattern uses at most one `*`, and only at the end.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    let stem = pattern.strip_suffix(WILDCARD).unwrap_or(pattern);
    if stem.contains(WILDCARD) {
        return Err(GitDirError::UserError(format!(
            "invalid no-prefix pattern '{}': only a single trailing '*' is supported",
            pattern
        )));
    }
    Ok(())
}

/// Resolved exclusion rules: exact names plus literal prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoPrefixRules {
    exact: BTreeSet<String>,
    prefixes: Vec<String>,
    all: bool,
}

impl NoPrefixRules {
    fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut rules = NoPrefixRules::default();
        for pattern in patterns {
            validate_pattern(pattern)?;
            match pattern.strip_suffix(WILDCARD) {
                Some("") => rules.all = true,
                Some(prefix) => rules.prefixes.push(prefix.to_string()),
                None => {
                    rules.exact.insert(pattern.to_string());
                }
            }
        }
        Ok(rules)
    }

    /// True if `branch` must keep its bare name.
    pub fn is_excluded(&self, branch: &str) -> bool {
        self.all
            || self.exact.contains(branch)
            || self.prefixes.iter().any(|p| branch.starts_with(p.as_str()))
    }
}

/// How ordinals are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalPolicy {
    /// Only prefixed branches consume an ordinal; numbering has no gaps.
    #[default]
    Compact,
    /// Every branch consumes the ordinal of its position, excluded or not.
    Positional,
}

/// Target directory name for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub branch: String,
    pub dir_name: String,
    pub ordinal: Option<u32>,
}

/// `"{ordinal:02}. {branch}"`
pub fn prefixed_dir_name(ordinal: u32, branch: &str) -> String {
    format!("{:02}. {}", ordinal, branch)
}

/// Hands out directory names one branch at a time, in listing order.
#[derive(Debug, Clone)]
pub struct OrdinalAllocator {
    rules: NoPrefixRules,
    policy: OrdinalPolicy,
    next: u32,
}

impl OrdinalAllocator {
    pub fn new(rules: NoPrefixRules, start_ordinal: u32, policy: OrdinalPolicy) -> Self {
        Self {
            rules,
            policy,
            next: start_ordinal,
        }
    }

    /// Name the next branch and advance the counter as the policy dictates.
    pub fn assign(&mut self, branch: &str) -> PlanEntry {
        let current = self.next;
        let excluded = self.rules.is_excluded(branch);

        if !excluded || self.policy == OrdinalPolicy::Positional {
            self.next = self.next.saturating_add(1);
        }

        let (dir_name, ordinal) = if excluded {
            (branch.to_string(), None)
        } else {
            (prefixed_dir_name(current, branch), Some(current))
        };
        tracing::debug!(branch, %dir_name, ?ordinal, "planned branch directory");

        PlanEntry {
            branch: branch.to_string(),
            dir_name,
            ordinal,
        }
    }
}

/// Plan every branch at once.
pub fn build_plan<'a>(
    branches: impl IntoIterator<Item = &'a str>,
    rules: NoPrefixRules,
    start_ordinal: u32,
    policy: OrdinalPolicy,
) -> Vec<PlanEntry> {
    let mut allocator = OrdinalAllocator::new(rules, start_ordinal, policy);
    branches.into_iter().map(|b| allocator.assign(b)).collect()
}
