//! Configuration loading and config file resolution
//!
//! Bootstrap values follow one priority order everywhere:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Command-line and environment tiers are handled by each binary's clap
//! arguments; this module owns the TOML and compiled-default tiers.
//!
//! A missing config file is not an error: the service logs a warning and starts
//! with compiled defaults. A config file that exists but cannot be parsed is an
//! error, because silently ignoring it would hide operator mistakes.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VSUM_CONFIG";

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port for vsum-eval
pub const DEFAULT_PORT: u16 = 5740;

/// Bootstrap configuration loaded from TOML file
///
/// Only values needed before the service can start live here. Module-specific
/// sections (e.g. `[embedding]`, `[scoring]`) are read by the module itself via
/// [`section`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Extract bootstrap values from a parsed TOML table
    ///
    /// Unknown keys (module sections) are ignored.
    pub fn from_table(table: &toml::Table) -> Result<Self> {
        let config = toml::Value::Table(table.clone()).try_into()?;
        Ok(config)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Config file resolver
///
/// Finds the TOML file for a module in priority order:
/// 1. Explicit path (command-line `--config`)
/// 2. `VSUM_CONFIG` environment variable
/// 3. User config directory (`~/.config/vsum/<module>.toml`)
/// 4. System config (`/etc/vsum/<module>.toml`, unix only)
pub struct ConfigFileResolver {
    module_name: String,
}

impl ConfigFileResolver {
    /// Create resolver for a module (e.g. "vsum-eval")
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    /// Resolve the config file path, or `None` if no file is configured or present
    ///
    /// Explicit paths (tiers 1 and 2) are returned even if the file does not
    /// exist, so the loader can warn about the missing file by name.
    pub fn resolve(&self, cli_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_path {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        let file_name = format!("{}.toml", self.module_name);

        if let Some(user_config) = dirs::config_dir().map(|d| d.join("vsum").join(&file_name)) {
            if user_config.exists() {
                return Some(user_config);
            }
        }

        if cfg!(unix) {
            let system_config = PathBuf::from("/etc/vsum").join(&file_name);
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }
}

/// Load a TOML file as a raw table
///
/// Returns `Ok(None)` when no path was resolved or the file does not exist
/// (graceful degradation to compiled defaults).
pub fn load_toml_table(path: Option<&Path>) -> Result<Option<toml::Table>> {
    let Some(path) = path else {
        info!("No config file found, using compiled defaults");
        return Ok(None);
    };

    if !path.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        );
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(Some(table))
}

/// Deserialize one named section of a config table
///
/// A missing table or missing section yields `T::default()`.
pub fn section<T>(table: Option<&toml::Table>, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match table.and_then(|t| t.get(key)) {
        Some(value) => value
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| Error::Config(format!("[{}]: {}", key, e))),
        None => Ok(T::default()),
    }
}
