//! vsum-eval library - Summary Evaluation module
//!
//! Scores a learner-written summary against a reference summary: similarity
//! score, performance tier, length diagnostics, sub-metrics and
//! recommendations. The engine lives in [`services`]; [`api`] exposes it over
//! HTTP.

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

use services::SummaryEvaluator;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Evaluation engine (read-only, shared by every request)
    pub evaluator: Arc<SummaryEvaluator>,
    /// Service start time, for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(evaluator: SummaryEvaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/evaluate", post(api::evaluate_summary))
        .route("/api/quick-evaluate", post(api::quick_evaluate))
        .route("/api/batch-evaluate", post(api::batch_evaluate))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
