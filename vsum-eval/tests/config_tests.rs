//! Module configuration tests
//!
//! Tests that touch `VSUM_EMBEDDING_API_KEY` are marked `#[serial]`.

use serial_test::serial;
use std::env;
use tempfile::TempDir;
use vsum_eval::config::{
    load_module_config, resolve_api_key, BackendKind, EmbeddingConfig, API_KEY_ENV_VAR,
};
use vsum_eval::models::{PerformanceLevel, RuleCondition};

#[test]
fn test_missing_file_uses_compiled_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_module_config(Some(&temp_dir.path().join("vsum-eval.toml"))).unwrap();

    assert!(config.source.is_none());
    assert_eq!(config.bootstrap.port, 5740);
    assert_eq!(config.embedding, EmbeddingConfig::default());
    config.scoring.validate().unwrap();
}

#[test]
fn test_full_file_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vsum-eval.toml");
    std::fs::write(
        &path,
        r#"
port = 6100

[embedding]
backend = "none"
timeout_ms = 1500

[scoring]
max_batch_size = 25

[scoring.weights]
semantic = 0.4
lexical = 0.4
length = 0.2

[[scoring.classification]]
lower = -inf
upper = 60.0
outcome = "Poor"

[[scoring.classification]]
lower = 60.0
upper = inf
outcome = "Good"

[[scoring.recommendations]]
condition = { level_is = "Poor" }
message = "Try again"
"#,
    )
    .unwrap();

    let config = load_module_config(Some(&path)).unwrap();

    assert_eq!(config.source.as_deref(), Some(path.as_path()));
    assert_eq!(config.bootstrap.port, 6100);
    assert_eq!(config.embedding.backend, BackendKind::None);
    assert_eq!(config.embedding.timeout_ms, 1500);
    assert_eq!(config.scoring.max_batch_size, 25);
    assert_eq!(config.scoring.weights.semantic, 0.4);
    assert_eq!(
        config.scoring.classification.classify(60.0),
        Some(&PerformanceLevel::Good)
    );
    assert_eq!(
        config.scoring.recommendations[0].condition,
        RuleCondition::LevelIs(PerformanceLevel::Poor)
    );
    config.scoring.validate().unwrap();
}

#[test]
fn test_invalid_scoring_table_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vsum-eval.toml");
    std::fs::write(
        &path,
        r#"
[[scoring.classification]]
lower = 0.0
upper = 50.0
outcome = "Poor"

[[scoring.classification]]
lower = 55.0
upper = inf
outcome = "Excellent"
"#,
    )
    .unwrap();

    let config = load_module_config(Some(&path)).unwrap();
    assert!(config.scoring.validate().is_err());
}

#[test]
fn test_malformed_section_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vsum-eval.toml");
    std::fs::write(&path, "[embedding]\ntimeout_ms = \"soon\"\n").unwrap();

    assert!(load_module_config(Some(&path)).is_err());
}

#[test]
#[serial]
fn test_api_key_env_wins_over_toml() {
    env::set_var(API_KEY_ENV_VAR, "env-key");
    let config = EmbeddingConfig {
        api_key: Some("toml-key".to_string()),
        ..EmbeddingConfig::default()
    };

    assert_eq!(resolve_api_key(&config), Some("env-key".to_string()));

    env::remove_var(API_KEY_ENV_VAR);
}

#[test]
#[serial]
fn test_api_key_blank_values_ignored() {
    env::set_var(API_KEY_ENV_VAR, "  ");
    let config = EmbeddingConfig {
        api_key: Some("toml-key".to_string()),
        ..EmbeddingConfig::default()
    };
    assert_eq!(resolve_api_key(&config), Some("toml-key".to_string()));

    let config = EmbeddingConfig {
        api_key: Some(String::new()),
        ..EmbeddingConfig::default()
    };
    assert_eq!(resolve_api_key(&config), None);

    env::remove_var(API_KEY_ENV_VAR);
}
