//! Error types for vsum-eval
//!
//! `EvaluationError` is the engine taxonomy. `ApiError` maps it (plus request
//! shape errors) onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use vsum_common::api::ErrorResponse;

/// Evaluation engine errors
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Empty or whitespace-only text; user-correctable, never retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Embedding backend down, slow or misbehaving
    ///
    /// Recovered inside the evaluator by falling back to lexical-only scoring.
    #[error("Semantic backend unavailable: {0}")]
    SemanticBackendUnavailable(String),

    /// Unexpected fault; aborts the current evaluation only
    #[error("Evaluation failed: {0}")]
    Internal(String),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Evaluation input rejected (400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed request, e.g. mismatched batch lists (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Semantic backend failure that escaped degradation (503)
    #[error("Semantic backend unavailable: {0}")]
    SemanticUnavailable(String),

    /// Internal server error (500)
    #[error("Evaluation failed: {0}")]
    Internal(String),
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EvaluationError::SemanticBackendUnavailable(msg) => ApiError::SemanticUnavailable(msg),
            EvaluationError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::SemanticUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::SemanticUnavailable(_) => "SEMANTIC_UNAVAILABLE",
            ApiError::Internal(_) => "EVALUATION_FAILED",
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.code();
        let message = match err {
            ApiError::InvalidInput(msg)
            | ApiError::BadRequest(msg)
            | ApiError::SemanticUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };
        ErrorResponse::new(code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_error_mapping() {
        let api: ApiError = EvaluationError::InvalidInput("user_text is empty".into()).into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.code(), "INVALID_INPUT");

        let api: ApiError = EvaluationError::SemanticBackendUnavailable("down".into()).into();
        assert_eq!(api.status(), StatusCode::SERVICE_UNAVAILABLE);

        let api: ApiError = EvaluationError::Internal("NaN score".into()).into();
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.code(), "EVALUATION_FAILED");
    }

    #[test]
    fn test_error_response_carries_bare_message() {
        let api: ApiError = EvaluationError::InvalidInput("user_text contains no words".into()).into();
        let body = ErrorResponse::from(api);
        assert_eq!(body.error.code, "INVALID_INPUT");
        assert_eq!(body.error.message, "user_text contains no words");
    }
}
