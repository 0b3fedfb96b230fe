//! Shared API request/response types

use serde::{Deserialize, Serialize};

// ========================================
// Error Response Types
// ========================================

/// Error response envelope
///
/// # Examples
///
/// ```
/// use vsum_common::api::types::ErrorResponse;
///
/// let error = ErrorResponse::new("INVALID_INPUT", "user_text is empty");
/// let json = serde_json::to_value(&error).unwrap();
/// assert_eq!(json["error"]["code"], "INVALID_INPUT");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error code and human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

// ========================================
// Health Types
// ========================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// Module name (e.g. "vsum-eval")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Name of the configured embedding backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_backend: Option<String>,
}
