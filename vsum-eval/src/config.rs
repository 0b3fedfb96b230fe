//! Configuration resolution for vsum-eval
//!
//! Bootstrap settings (`host`, `port`, `[logging]`) come from
//! `vsum_common::config::TomlConfig`. This module adds the `[embedding]` and
//! `[scoring]` sections and builds the embedding backend from them.
//!
//! Priority for every value: CLI → ENV → TOML → compiled default. CLI and ENV
//! overrides are applied by `main` through clap; the API key is the one value
//! resolved here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use vsum_common::config::{load_toml_table, section, TomlConfig};
use vsum_common::Result;

use crate::models::ScoringParams;
use crate::services::embedding::{
    EmbeddingBackend, EmbeddingError, HashingEmbedder, HttpEmbeddingBackend, UnavailableBackend,
};

/// Environment variable holding the embedding service API key
pub const API_KEY_ENV_VAR: &str = "VSUM_EMBEDDING_API_KEY";

/// Which embedding backend to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OpenAI-compatible embedding service
    Http,
    /// Local deterministic feature hashing
    Hashing,
    /// Semantic scoring disabled (lexical-only evaluation)
    None,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Http => "http",
            BackendKind::Hashing => "hashing",
            BackendKind::None => "none",
        }
    }
}

/// `[embedding]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: BackendKind,
    /// API root of the embedding service (http backend)
    pub url: String,
    /// Model name sent with each request (http backend)
    pub model: String,
    /// Bearer token (http backend); `VSUM_EMBEDDING_API_KEY` takes priority
    pub api_key: Option<String>,
    /// Upper bound on one embedding call, in milliseconds
    pub timeout_ms: u64,
    /// Vector dimension (hashing backend)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Hashing,
            url: "http://127.0.0.1:8080/v1".to_string(),
            model: "all-MiniLM-L6-v2".to_string(),
            api_key: None,
            timeout_ms: 5000,
            dimensions: HashingEmbedder::default().dimensions(),
        }
    }
}

impl EmbeddingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Everything vsum-eval reads from its config file
#[derive(Debug, Clone, Default)]
pub struct ModuleConfig {
    /// Path the config was read from, if any
    pub source: Option<PathBuf>,
    pub bootstrap: TomlConfig,
    pub embedding: EmbeddingConfig,
    pub scoring: ScoringParams,
}

/// Load the module config file
///
/// A missing file yields compiled defaults; an unparsable file or section is
/// an error. Scoring parameters are NOT validated here.
pub fn load_module_config(path: Option<&Path>) -> Result<ModuleConfig> {
    let table = load_toml_table(path)?;
    let table = table.as_ref();

    let bootstrap = match table {
        Some(t) => TomlConfig::from_table(t)?,
        None => TomlConfig::default(),
    };

    Ok(ModuleConfig {
        source: table.and(path.map(Path::to_path_buf)),
        bootstrap,
        embedding: section(table, "embedding")?,
        scoring: section(table, "scoring")?,
    })
}

/// Resolve the embedding API key
///
/// **Priority:** ENV → TOML. Blank values are ignored.
pub fn resolve_api_key(config: &EmbeddingConfig) -> Option<String> {
    let env_key = std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = config.api_key.clone().filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Embedding API key found in environment and TOML. Using environment (highest priority)."
        );
    }

    if env_key.is_some() {
        info!("Embedding API key loaded from environment variable");
        return env_key;
    }
    if toml_key.is_some() {
        info!("Embedding API key loaded from TOML config");
    }
    toml_key
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Build the configured embedding backend
///
/// Called once at startup; the backend is then shared read-only.
pub fn build_backend(
    config: &EmbeddingConfig,
) -> std::result::Result<Arc<dyn EmbeddingBackend>, EmbeddingError> {
    let backend: Arc<dyn EmbeddingBackend> = match config.backend {
        BackendKind::Http => Arc::new(HttpEmbeddingBackend::new(
            &config.url,
            config.model.clone(),
            resolve_api_key(config),
            config.timeout(),
        )?),
        BackendKind::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)),
        BackendKind::None => Arc::new(UnavailableBackend::new(
            "semantic scoring disabled by configuration",
        )),
    };

    info!(backend = backend.name(), "Embedding backend ready");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_defaults() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.backend, BackendKind::Hashing);
        assert_eq!(config.model, "all-MiniLM-L6-v2");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.dimensions, 384);
    }

    #[test]
    fn test_embedding_section_parse() {
        let table: toml::Table = r#"
            [embedding]
            backend = "http"
            url = "http://embeddings.local/v1"
            timeout_ms = 250
        "#
        .parse()
        .unwrap();

        let config: EmbeddingConfig = section(Some(&table), "embedding").unwrap();
        assert_eq!(config.backend, BackendKind::Http);
        assert_eq!(config.url, "http://embeddings.local/v1");
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.model, "all-MiniLM-L6-v2");
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let table: toml::Table = "[embedding]\nbackend = \"onnx\"\n".parse().unwrap();
        let result: Result<EmbeddingConfig> = section(Some(&table), "embedding");
        assert!(result.is_err());
    }

    #[test]
    fn test_build_backend_names() {
        let mut config = EmbeddingConfig::default();
        assert_eq!(build_backend(&config).unwrap().name(), "hashing");

        config.backend = BackendKind::None;
        assert_eq!(build_backend(&config).unwrap().name(), "none");

        config.backend = BackendKind::Http;
        assert_eq!(build_backend(&config).unwrap().name(), "http");
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("abc"));
        assert!(!is_valid_key("   "));
        assert!(!is_valid_key(""));
    }
}
