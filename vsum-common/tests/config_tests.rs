//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests cover:
//! - Missing TOML files SHALL NOT cause termination
//! - Unparsable TOML files SHALL be reported
//! - Priority order for config file resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate VSUM_CONFIG are marked with #[serial].

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;
use vsum_common::config::{load_toml_table, ConfigFileResolver, TomlConfig, CONFIG_ENV_VAR};
use vsum_common::Error;

#[test]
#[serial]
fn test_resolver_cli_path_wins_over_env() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/vsum-from-env.toml");

    let resolver = ConfigFileResolver::new("vsum-eval");
    let cli = PathBuf::from("/tmp/vsum-from-cli.toml");
    let resolved = resolver.resolve(Some(&cli));

    assert_eq!(resolved, Some(cli));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_env_var_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/vsum-from-env.toml");

    let resolver = ConfigFileResolver::new("vsum-eval");
    let resolved = resolver.resolve(None);

    assert_eq!(resolved, Some(PathBuf::from("/tmp/vsum-from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_blank_env_var_ignored() {
    env::set_var(CONFIG_ENV_VAR, "   ");

    // Module name chosen so no user/system file can exist
    let resolver = ConfigFileResolver::new("vsum-test-module-that-does-not-exist");
    assert_eq!(resolver.resolve(None), None);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_missing_file_degrades_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let table = load_toml_table(Some(&missing)).unwrap();
    assert!(table.is_none());

    let table = load_toml_table(None).unwrap();
    assert!(table.is_none());
}

#[test]
fn test_valid_file_loads_bootstrap_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vsum-eval.toml");
    std::fs::write(
        &path,
        r#"
host = "0.0.0.0"
port = 8088

[logging]
level = "warn"
file = "/tmp/vsum.log"
"#,
    )
    .unwrap();

    let table = load_toml_table(Some(&path)).unwrap().expect("table loaded");
    let config = TomlConfig::from_table(&table).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8088);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/vsum.log")));
}

#[test]
fn test_unparsable_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "port = [unterminated").unwrap();

    let result = load_toml_table(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_wrong_value_type_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("typed.toml");
    std::fs::write(&path, "port = \"not-a-number\"").unwrap();

    let table = load_toml_table(Some(&path)).unwrap().unwrap();
    assert!(TomlConfig::from_table(&table).is_err());
}
