//! Shared HTTP API types
//!
//! Framework-independent response shapes used by every VSUM service. Each
//! service wraps these with its own axum `IntoResponse` impls.

pub mod types;

pub use types::{ErrorBody, ErrorResponse, HealthResponse};
