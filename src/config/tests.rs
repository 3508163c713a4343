//! Tests for config functionality.

use crate::config::{Config, NoPrefixSetting, Overrides};
use crate::naming::{ExclusionSpec, OrdinalPolicy};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.output_dir, PathBuf::from("git-dir"));
    assert_eq!(config.no_prefix, None);
    assert_eq!(config.start_ordinal, 1);
    assert_eq!(config.ordinal_policy, OrdinalPolicy::Compact);
    assert!(!config.manifest);
    assert_eq!(config.exclusion_spec(), ExclusionSpec::Default);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_single_pattern() {
    let config = Config::from_yaml("no_prefix: \"*\"\n").unwrap();
    assert_eq!(config.no_prefix, Some(NoPrefixSetting::One("*".to_string())));
    assert_eq!(config.exclusion_spec(), ExclusionSpec::ExcludeAll);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
output_dir: exported
no_prefix:
  - trunk
  - "release/*"
start_ordinal: 5
ordinal_policy: positional
manifest: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.output_dir, PathBuf::from("exported"));
    assert_eq!(config.start_ordinal, 5);
    assert_eq!(config.ordinal_policy, OrdinalPolicy::Positional);
    assert!(config.manifest);
    assert_eq!(
        config.exclusion_spec(),
        ExclusionSpec::Patterns(vec!["trunk".to_string(), "release/*".to_string()])
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = "start_ordinal: 2\nfuture_option: true\n";
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.start_ordinal, 2);
}

#[test]
fn test_zero_start_ordinal_is_rejected() {
    let err = Config::from_yaml("start_ordinal: 0\n").unwrap_err();
    assert!(err.to_string().contains("start_ordinal"));
}

#[test]
fn test_inner_wildcard_is_rejected() {
    let err = Config::from_yaml("no_prefix: \"fe*at\"\n").unwrap_err();
    assert!(err.to_string().contains("single trailing"));
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("start_ordinal: [oops").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_yaml_roundtrip_keeps_values() {
    let config = Config {
        no_prefix: Some(NoPrefixSetting::Many(vec!["main".to_string()])),
        start_ordinal: 3,
        ..Config::default()
    };
    let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_overrides_replace_file_values() {
    let config = Config::from_yaml("output_dir: from-file\nstart_ordinal: 4\n").unwrap();
    let config = config
        .with_overrides(Overrides {
            output_dir: Some(PathBuf::from("from-cli")),
            no_prefix: Some(vec!["rel*".to_string()]),
            start_ordinal: None,
            ordinal_policy: Some(OrdinalPolicy::Positional),
            manifest: true,
        })
        .unwrap();

    assert_eq!(config.output_dir, PathBuf::from("from-cli"));
    assert_eq!(config.start_ordinal, 4);
    assert_eq!(config.ordinal_policy, OrdinalPolicy::Positional);
    assert!(config.manifest);
    assert!(matches!(config.exclusion_spec(), ExclusionSpec::Patterns(_)));
}

#[test]
fn test_overrides_are_validated() {
    let err = Config::default()
        .with_overrides(Overrides {
            start_ordinal: Some(0),
            ..Overrides::default()
        })
        .unwrap_err();
    assert!(err.to_string().contains("start_ordinal"));
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::discover(temp_dir.path(), None).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_discover_reads_default_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".git-dir.yaml"), "output_dir: snapshots\n").unwrap();

    let config = Config::discover(temp_dir.path(), None).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("snapshots"));
}

#[test]
fn test_discover_explicit_file_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::discover(temp_dir.path(), Some(PathBuf::from("nope.yaml").as_path()))
        .unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
