//! Embedding backends
//!
//! The semantic scorer depends only on the [`EmbeddingBackend`] capability.
//! The backend is built once at startup, held as `Arc<dyn EmbeddingBackend>`
//! and shared read-only by every evaluation.
//!
//! # Backends
//! - [`HttpEmbeddingBackend`] - OpenAI-compatible `/embeddings` service (real model)
//! - [`HashingEmbedder`] - deterministic local feature hashing, no model required
//! - [`UnavailableBackend`] - always fails, forcing lexical-only evaluation

mod cache;
mod hashing;
mod http;
mod unavailable;

pub use cache::EmbeddingCache;
pub use hashing::HashingEmbedder;
pub use http::HttpEmbeddingBackend;
pub use unavailable::UnavailableBackend;

use thiserror::Error;

/// Embedding backend errors
///
/// Every variant is treated by the semantic scorer as "semantic signal
/// unavailable"; none is ever surfaced to an API caller.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Backend did not answer within the configured timeout
    #[error("Embedding request timed out after {0} ms")]
    Timeout(u64),

    /// Backend returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse backend response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Vectors of different length cannot be compared
    #[error("Dimension mismatch: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    /// Backend is disabled or not configured
    #[error("Embedding backend unavailable: {0}")]
    Unavailable(String),
}

/// Text embedding capability
///
/// Implementations must be deterministic for a given model: the same text
/// always yields the same vector.
#[async_trait::async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Backend name for logging and the health endpoint
    fn name(&self) -> &'static str;

    /// Encode one text into a fixed-dimension vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Encode several texts, preserving input order
    ///
    /// Default implementation embeds one at a time; backends with a native
    /// batch API should override this.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Embed a short probe text and return the vector dimension
    ///
    /// Used once at startup so misconfiguration shows up in the log before
    /// the first evaluation.
    async fn probe(&self) -> Result<usize, EmbeddingError> {
        Ok(self.embed("summary evaluation probe").await?.len())
    }
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`, clamped to [-1, 1]
///
/// A zero-norm vector yields 0.0.
///
/// # Errors
/// Returns `DimensionMismatch` if the vectors differ in length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch(a.len(), b.len()));
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}
