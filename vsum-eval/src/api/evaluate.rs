//! Evaluation endpoints
//!
//! - `POST /api/evaluate` - full `EvaluationResult`
//! - `POST /api/quick-evaluate` - score, level and feedback only
//! - `POST /api/batch-evaluate` - paired lists of summaries

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use vsum_common::api::ErrorResponse;

use crate::error::{ApiError, ApiResult};
use crate::models::{EvaluationRequest, EvaluationResult, PerformanceLevel};
use crate::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Single evaluation request body
///
/// Missing text fields deserialize as empty strings and are rejected by the
/// evaluator with `INVALID_INPUT`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub user_text: String,
    #[serde(default, alias = "reference_summary", alias = "video_summary")]
    pub reference_text: String,
    /// Opaque identifier (string or number), used only for logging
    #[serde(default)]
    pub video_id: Option<serde_json::Value>,
}

impl EvaluateRequest {
    fn into_request(self) -> EvaluationRequest {
        let subject_id = self.video_id.and_then(|id| match id {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        EvaluationRequest::new(self.user_text, self.reference_text, subject_id)
    }
}

/// Quick evaluation response
#[derive(Debug, Serialize, Deserialize)]
pub struct QuickEvaluateResponse {
    pub score_percentage: u8,
    pub performance_level: PerformanceLevel,
    pub feedback_message: String,
    pub degraded: bool,
}

impl From<EvaluationResult> for QuickEvaluateResponse {
    fn from(result: EvaluationResult) -> Self {
        Self {
            score_percentage: result.score_percentage,
            performance_level: result.performance_level,
            feedback_message: result.feedback_message,
            degraded: result.degraded,
        }
    }
}

/// Batch evaluation request body
#[derive(Debug, Deserialize)]
pub struct BatchEvaluateRequest {
    #[serde(default)]
    pub user_summaries: Vec<String>,
    #[serde(default)]
    pub reference_summaries: Vec<String>,
}

/// One batch entry: a result or that item's error
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Evaluated(Box<EvaluationResult>),
    Failed(ErrorResponse),
}

/// Batch evaluation response
#[derive(Debug, Serialize)]
pub struct BatchEvaluateResponse {
    pub batch_results: Vec<BatchItem>,
    pub total_evaluations: usize,
    /// Mean `score_percentage` of successful items (0 when none succeeded)
    pub average_score: f64,
}

// ============================================================================
// Handlers
// ============================================================================

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// POST /api/evaluate
pub async fn evaluate_summary(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> ApiResult<Json<EvaluationResult>> {
    let request = json_body(payload)?.into_request();
    let result = state.evaluator.evaluate(&request).await?;
    Ok(Json(result))
}

/// POST /api/quick-evaluate
pub async fn quick_evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> ApiResult<Json<QuickEvaluateResponse>> {
    let request = json_body(payload)?.into_request();
    let result = state.evaluator.evaluate(&request).await?;
    Ok(Json(result.into()))
}

/// POST /api/batch-evaluate
///
/// Items are evaluated in order and share one embedding cache. An invalid item
/// is reported in place without failing the batch.
pub async fn batch_evaluate(
    State(state): State<AppState>,
    payload: Result<Json<BatchEvaluateRequest>, JsonRejection>,
) -> ApiResult<Json<BatchEvaluateResponse>> {
    let body = json_body(payload)?;

    if body.user_summaries.is_empty() || body.reference_summaries.is_empty() {
        return Err(ApiError::BadRequest(
            "user_summaries and reference_summaries must both be non-empty".to_string(),
        ));
    }
    if body.user_summaries.len() != body.reference_summaries.len() {
        return Err(ApiError::BadRequest(format!(
            "user_summaries ({}) and reference_summaries ({}) must have the same length",
            body.user_summaries.len(),
            body.reference_summaries.len()
        )));
    }
    let max_batch_size = state.evaluator.params().max_batch_size;
    if body.user_summaries.len() > max_batch_size {
        return Err(ApiError::BadRequest(format!(
            "batch of {} exceeds the limit of {}",
            body.user_summaries.len(),
            max_batch_size
        )));
    }

    let requests: Vec<EvaluationRequest> = body
        .user_summaries
        .into_iter()
        .zip(body.reference_summaries)
        .map(|(user, reference)| EvaluationRequest::new(user, reference, None))
        .collect();

    let outcomes = state.evaluator.evaluate_batch(&requests).await;

    let mut score_sum = 0u64;
    let mut succeeded = 0usize;
    let batch_results: Vec<BatchItem> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            Ok(result) => {
                score_sum += u64::from(result.score_percentage);
                succeeded += 1;
                BatchItem::Evaluated(Box::new(result))
            }
            Err(e) => BatchItem::Failed(ErrorResponse::from(ApiError::from(e))),
        })
        .collect();

    let average_score = if succeeded == 0 {
        0.0
    } else {
        score_sum as f64 / succeeded as f64
    };

    info!(
        total = batch_results.len(),
        succeeded,
        average_score,
        "Batch evaluation complete"
    );

    Ok(Json(BatchEvaluateResponse {
        total_evaluations: batch_results.len(),
        batch_results,
        average_score,
    }))
}
