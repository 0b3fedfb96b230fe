//! vsum-eval (Summary Evaluation) - learner summary scoring service
//!
//! Compares a learner's free-text video summary to a reference summary and
//! returns a score, performance tier, length diagnostics and recommendations.
//!
//! Configuration priority: CLI → ENV → TOML → compiled default.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use vsum_common::config::ConfigFileResolver;
use vsum_common::logging::init_tracing;
use vsum_eval::config::{build_backend, load_module_config, BackendKind, EmbeddingConfig};
use vsum_eval::services::{EmbeddingBackend, SummaryEvaluator};
use vsum_eval::{build_router, AppState};

const MODULE_NAME: &str = "vsum-eval";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "vsum-eval", version, about = "Summary evaluation service")]
struct Args {
    /// Config file path (overrides VSUM_CONFIG and default locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long, env = "VSUM_HOST")]
    host: Option<String>,

    /// HTTP port
    #[arg(long, env = "VSUM_PORT")]
    port: Option<u16>,

    /// Embedding backend
    #[arg(long, env = "VSUM_EMBEDDING_BACKEND", value_enum)]
    embedding_backend: Option<BackendKind>,

    /// Embedding service API root (http backend)
    #[arg(long, env = "VSUM_EMBEDDING_URL")]
    embedding_url: Option<String>,

    /// Log level (ignored when RUST_LOG is set)
    #[arg(long, env = "VSUM_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file first: logging settings live in it
    let config_path = ConfigFileResolver::new(MODULE_NAME).resolve(args.config.as_deref());
    let mut config = load_module_config(config_path.as_deref())
        .context("Failed to load configuration")?;

    if let Some(level) = args.log_level {
        config.bootstrap.logging.level = level;
    }
    init_tracing(&config.bootstrap.logging).context("Failed to initialize logging")?;

    // Log build identification immediately after tracing init
    info!(
        "Starting VSUM Summary Evaluation ({}) v{} [{}] built {} ({})",
        MODULE_NAME,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config.source, &config_path) {
        (Some(path), _) => info!("Configuration: {}", path.display()),
        (None, Some(missing)) => warn!(
            "Config file {} not found, using compiled defaults",
            missing.display()
        ),
        (None, None) => info!("Configuration: compiled defaults"),
    }

    config
        .scoring
        .validate()
        .context("Invalid [scoring] parameters")?;

    if let Some(kind) = args.embedding_backend {
        config.embedding.backend = kind;
    }
    if let Some(url) = args.embedding_url {
        config.embedding.url = url;
    }

    let backend = build_backend(&config.embedding).context("Failed to create embedding backend")?;

    if config.embedding.backend == BackendKind::None {
        warn!("Semantic scoring disabled; every evaluation will be lexical-only (degraded)");
    } else {
        probe_backend(backend.as_ref(), &config.embedding).await;
    }

    let evaluator = SummaryEvaluator::new(
        backend,
        config.scoring.clone(),
        config.embedding.timeout(),
    );
    info!(
        backend = evaluator.backend_name(),
        timeout_ms = config.embedding.timeout_ms,
        max_batch_size = evaluator.params().max_batch_size,
        "Evaluation engine ready"
    );

    let state = AppState::new(evaluator);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.bootstrap.host);
    let port = args.port.unwrap_or(config.bootstrap.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("vsum-eval listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Embed a probe text once so a misconfigured backend shows up at startup
///
/// Failure is not fatal: evaluations degrade to lexical-only until the
/// backend becomes reachable.
async fn probe_backend(backend: &dyn EmbeddingBackend, config: &EmbeddingConfig) {
    match backend.probe().await {
        Ok(dimensions) => info!(
            backend = backend.name(),
            dimensions,
            "✓ Embedding backend reachable"
        ),
        Err(e) => warn!(
            backend = backend.name(),
            url = %config.url,
            model = %config.model,
            "Embedding backend unreachable, evaluations will degrade until it recovers: {}",
            e
        ),
    }
}
