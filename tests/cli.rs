#![cfg(feature = "cli")]
//! Tests for command-line config resolution and one-shot logging.

use clap::Parser;
use rotalog::cli::{Cli, run};
use rotalog::{Error, Level, TimeThreshold};
use std::fs;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("rotalog").chain(args.iter().copied()))
}

#[test]
fn overrides_apply_on_defaults() {
    let cli = parse(&[
        "--dir",
        "/tmp/x",
        "--prefix",
        "job_",
        "--min-level",
        "warn",
        "--max-size",
        "2K",
        "--every",
        "daily",
        "hello",
    ]);
    let config = cli.resolve_config().unwrap();

    assert_eq!(config.level(), Level::Warn);
    assert_eq!(config.file_prefix(), "job_");
    assert_eq!(config.size_threshold(), Some(2048));
    assert_eq!(config.time_threshold(), Some(TimeThreshold::Daily));
    assert_eq!(cli.message, vec!["hello"]);
}

#[test]
fn no_roll_disables_policy() {
    let config = parse(&["--no-roll", "m"]).resolve_config().unwrap();
    assert!(config.rolling_policy().is_none());
}

#[test]
fn no_roll_conflicts_with_thresholds() {
    assert!(Cli::try_parse_from(["rotalog", "--no-roll", "--max-size", "2K", "m"]).is_err());
}

#[test]
fn too_small_size_is_rejected() {
    let err = parse(&["--max-size", "100", "m"]).resolve_config().unwrap_err();
    assert!(matches!(err, Error::InvalidThreshold(_)));
}

#[test]
fn config_file_is_layered_under_flags() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("c.json");
    fs::write(&path, r#"{"level": 0, "file_prefix": "file_"}"#).unwrap();

    let config = parse(&["--config", path.to_str().unwrap(), "--prefix", "flag_", "m"])
        .resolve_config()
        .unwrap();
    assert_eq!(config.level(), Level::Debug);
    assert_eq!(config.file_prefix(), "flag_");
}

#[test]
fn run_writes_message() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();
    let cli = parse(&["--dir", dir, "--level", "error", "disk", "failure"]);

    let _ = run(&cli);

    let entry = fs::read_dir(tmp.path()).unwrap().next().unwrap().unwrap();
    let content = fs::read_to_string(entry.path()).unwrap();
    assert!(content.contains("[ERROR] rotalog disk failure"));
}
