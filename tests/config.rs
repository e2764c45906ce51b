//! Tests for building a logger configuration in code and from key-value data.

use rotalog::config::{DEFAULT_FILE_PREFIX, RollingOverride};
use rotalog::{Error, Level, LoggerConfig, PartialConfig, RollingPolicy, TimeThreshold};
use serde_json::{Map, Value, json};
use std::path::Path;

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(m) => m,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn defaults() {
    let config = LoggerConfig::with_defaults();
    assert_eq!(config.level(), Level::Info);
    assert_eq!(config.file_prefix(), DEFAULT_FILE_PREFIX);
    assert_eq!(config.rolling_policy(), Some(&RollingPolicy::default()));
    assert_eq!(config.log_dir(), Path::new("logs"));
}

#[test]
fn builder_style_updates() {
    let config = LoggerConfig::with_defaults()
        .with_log_level(Level::Error)
        .with_file_prefix("svc_")
        .unwrap()
        .with_log_dir("/var/log/svc")
        .with_rolling_policy(
            RollingPolicy::new().with_time_interval(TimeThreshold::Weekly),
        );

    assert_eq!(config.level(), Level::Error);
    assert_eq!(config.file_prefix(), "svc_");
    assert_eq!(config.log_dir(), Path::new("/var/log/svc"));
    assert_eq!(config.time_threshold(), Some(TimeThreshold::Weekly));
}

#[test]
fn without_rolling_clears_policy() {
    let config = LoggerConfig::with_defaults().without_rolling();
    assert!(config.rolling_policy().is_none());
    assert_eq!(config.size_threshold(), None);
    assert_eq!(config.time_threshold(), None);
}

#[test]
fn invalid_prefixes_are_rejected() {
    for bad in ["", "logs/app_", "..\\app_", "nul\0"] {
        assert!(
            matches!(
                LoggerConfig::with_defaults().with_file_prefix(bad),
                Err(Error::InvalidPrefix(_))
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn reapplying_current_values_changes_nothing() {
    let config = LoggerConfig::with_defaults()
        .with_file_prefix("api_")
        .unwrap()
        .with_log_level(Level::Warn);

    let again = config
        .clone()
        .with_log_level(config.level())
        .with_file_prefix(config.file_prefix())
        .unwrap()
        .with_rolling_policy(*config.rolling_policy().unwrap());

    assert_eq!(config, again);
}

#[test]
fn from_map_round_trip() {
    let config = LoggerConfig::from_map(&map(json!({
        "level": 3,
        "file_prefix": "billing_",
        "log_dir": "/tmp/billing",
        "rolling_config": {"size_threshold": 2048, "time_threshold": 86400}
    })))
    .unwrap();

    assert_eq!(config.level(), Level::Error);
    assert_eq!(config.file_prefix(), "billing_");
    assert_eq!(config.log_dir(), Path::new("/tmp/billing"));
    assert_eq!(config.size_threshold(), Some(2048));
    assert_eq!(config.time_threshold(), Some(TimeThreshold::Daily));
}

#[test]
fn from_map_missing_keys_keep_defaults() {
    let config = LoggerConfig::from_map(&map(json!({"level": 0}))).unwrap();
    assert_eq!(config.level(), Level::Debug);
    assert_eq!(config.file_prefix(), DEFAULT_FILE_PREFIX);
    assert_eq!(config.rolling_policy(), Some(&RollingPolicy::default()));

    let empty = LoggerConfig::from_map(&Map::new()).unwrap();
    assert_eq!(empty, LoggerConfig::default());
}

#[test]
fn from_map_ignores_unknown_keys() {
    let config = LoggerConfig::from_map(&map(json!({
        "file_prefix": "x_",
        "colors": {"info": "green"},
        "retention_days": 7
    })))
    .unwrap();
    assert_eq!(config.file_prefix(), "x_");
}

#[test]
fn from_map_rolling_config_builds_on_policy_defaults() {
    let config = LoggerConfig::from_map(&map(json!({
        "rolling_config": {"time_threshold": 60}
    })))
    .unwrap();
    assert_eq!(config.size_threshold(), Some(RollingPolicy::FIVE_MB));
    assert_eq!(config.time_threshold(), Some(TimeThreshold::Minutely));
}

#[test]
fn from_map_null_rolling_config_disables_rolling() {
    let config = LoggerConfig::from_map(&map(json!({"rolling_config": null}))).unwrap();
    assert!(config.rolling_policy().is_none());
}

#[test]
fn from_map_reports_the_offending_field() {
    assert!(matches!(
        LoggerConfig::from_map(&map(json!({"level": 12}))),
        Err(Error::InvalidLevel(_))
    ));
    assert!(matches!(
        LoggerConfig::from_map(&map(json!({"file_prefix": 42}))),
        Err(Error::InvalidPrefix(_))
    ));
    assert!(matches!(
        LoggerConfig::from_map(&map(json!({"file_prefix": ""}))),
        Err(Error::InvalidPrefix(_))
    ));
    assert!(matches!(
        LoggerConfig::from_map(&map(json!({"rolling_config": "big"}))),
        Err(Error::InvalidThreshold(_))
    ));
    assert!(matches!(
        LoggerConfig::from_map(&map(json!({"rolling_config": {"size_threshold": 1023}}))),
        Err(Error::InvalidThreshold(_))
    ));
    assert!(matches!(
        LoggerConfig::from_map(&map(json!({"log_dir": 5}))),
        Err(Error::InvalidPath(_))
    ));
}

#[test]
fn merge_map_layers_onto_existing_config() {
    let base = LoggerConfig::with_defaults()
        .with_file_prefix("base_")
        .unwrap()
        .with_log_level(Level::Debug);

    let merged = base.merge_map(&map(json!({"level": "warn"}))).unwrap();
    assert_eq!(merged.level(), Level::Warn);
    assert_eq!(merged.file_prefix(), "base_");
}

#[test]
fn with_rolling_map_validates() {
    let config = LoggerConfig::with_defaults()
        .with_rolling_map(&map(json!({"size_threshold": "1K"})))
        .unwrap();
    assert_eq!(config.size_threshold(), Some(1024));

    assert!(
        LoggerConfig::with_defaults()
            .with_rolling_map(&map(json!({"time_threshold": 1})))
            .is_err()
    );
}

#[test]
fn partial_config_only_holds_present_keys() {
    let partial = PartialConfig::from_map(&map(json!({"rolling_config": null}))).unwrap();
    assert_eq!(partial.rolling, Some(RollingOverride::Disabled));
    assert!(partial.level.is_none());
    assert!(partial.file_prefix.is_none());
    assert!(!partial.is_empty());

    assert!(PartialConfig::from_map(&map(json!({"other": 1}))).unwrap().is_empty());
}

#[test]
fn to_json_reports_effective_values() {
    let config = LoggerConfig::with_defaults().with_file_prefix("dump_").unwrap();
    let value: Value = serde_json::from_str(&config.to_json()).unwrap();
    assert_eq!(value["file_prefix"], "dump_");
    assert_eq!(value["level"], "info");
    assert_eq!(value["rolling_policy"]["time_threshold"], "hourly");
}
