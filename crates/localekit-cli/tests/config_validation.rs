// crates/localekit-cli/tests/config_validation.rs
// ============================================================================
// Module: CLI Configuration Tests
// Description: Validates strict TOML loading for the localekit binary.
// Purpose: Ensure unknown keys and relative paths fail closed.
// Dependencies: localekit-cli, tempfile
// ============================================================================

//! ## Overview
//! Exercises configuration defaults, partial overrides, unknown-key
//! rejection, and the absolute-path requirement.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use std::path::Path;
use std::path::PathBuf;

use localekit_cli::CliConfig;
use localekit_cli::ConfigError;

/// Writes a config file and returns its path.
fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("localekit.toml");
    std::fs::write(&path, content).expect("write config");
    path
}

#[test]
fn defaults_point_at_stock_system_paths() {
    let config = CliConfig::default();
    assert_eq!(config.definition_file, PathBuf::from("/etc/locale.gen"));
    assert_eq!(config.query_tool, PathBuf::from("/usr/bin/check-language-support"));
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults_for_absent_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "definition_file = \"/tmp/locale.gen\"\n");
    let config = CliConfig::load(&path).expect("config should load");
    assert_eq!(config.definition_file, PathBuf::from("/tmp/locale.gen"));
    assert_eq!(config.pkcon, PathBuf::from("/usr/bin/pkcon"));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "definition_file = \"/tmp/locale.gen\"\nextra = 1\n");
    assert!(matches!(CliConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn relative_paths_are_rejected_with_the_key_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "query_tool = \"check-language-support\"\n");
    match CliConfig::load(&path) {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("query_tool")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = CliConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
