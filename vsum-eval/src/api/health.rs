//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use vsum_common::api::HealthResponse;

use crate::AppState;

/// GET /health
///
/// Reports liveness, uptime and which embedding backend is in use.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "vsum-eval".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        embedding_backend: Some(state.evaluator.backend_name().to_string()),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
