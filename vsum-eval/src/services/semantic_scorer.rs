//! Semantic Similarity Scorer
//!
//! Embeds candidate and reference text with the injected backend and compares
//! them by cosine similarity. Every embedding failure, including a timeout,
//! is reported as `SemanticBackendUnavailable`; the evaluator decides how to
//! degrade.

use std::sync::Arc;
use std::time::Duration;

use super::embedding::{cosine_similarity, EmbeddingBackend, EmbeddingCache, EmbeddingError};
use crate::error::EvaluationError;
use crate::models::SemanticMetrics;

/// Semantic scorer over a shared, read-only embedding backend
#[derive(Clone)]
pub struct SemanticScorer {
    backend: Arc<dyn EmbeddingBackend>,
    timeout: Duration,
}

impl SemanticScorer {
    pub fn new(backend: Arc<dyn EmbeddingBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Score meaning-level similarity between two texts
    ///
    /// Vectors already present in `cache` are reused; the rest are fetched in
    /// one `embed_batch` call bounded by the configured timeout.
    pub async fn score_semantic(
        &self,
        candidate_text: &str,
        reference_text: &str,
        cache: &mut EmbeddingCache,
    ) -> Result<SemanticMetrics, EvaluationError> {
        let cached_candidate = cache.get(candidate_text);
        let cached_reference = if candidate_text == reference_text {
            cached_candidate.clone()
        } else {
            cache.get(reference_text)
        };

        let mut missing: Vec<&str> = Vec::with_capacity(2);
        if cached_candidate.is_none() {
            missing.push(candidate_text);
        }
        if cached_reference.is_none() && candidate_text != reference_text {
            missing.push(reference_text);
        }

        if !missing.is_empty() {
            let fetched = self.embed_with_timeout(&missing).await?;
            for (text, vector) in missing.iter().zip(fetched) {
                cache.insert(text, vector);
            }
        }

        let (Some(candidate), Some(reference)) = (
            cached_candidate.or_else(|| cache.get(candidate_text)),
            cached_reference.or_else(|| cache.get(reference_text)),
        ) else {
            return Err(EvaluationError::SemanticBackendUnavailable(
                "backend returned fewer vectors than requested".to_string(),
            ));
        };

        let cosine = cosine_similarity(&candidate, &reference).map_err(unavailable)?;
        if !cosine.is_finite() {
            return Err(EvaluationError::SemanticBackendUnavailable(
                "backend returned non-finite vector components".to_string(),
            ));
        }

        Ok(SemanticMetrics {
            cosine_similarity: cosine,
            normalized_score: normalize_cosine(cosine),
        })
    }

    async fn embed_with_timeout(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EvaluationError> {
        let vectors = match tokio::time::timeout(self.timeout, self.backend.embed_batch(texts)).await
        {
            Ok(result) => result.map_err(unavailable)?,
            Err(_) => {
                return Err(unavailable(EmbeddingError::Timeout(
                    self.timeout.as_millis() as u64,
                )))
            }
        };

        if vectors.len() != texts.len() {
            return Err(unavailable(EmbeddingError::Parse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            ))));
        }

        Ok(vectors)
    }
}

fn unavailable(err: EmbeddingError) -> EvaluationError {
    EvaluationError::SemanticBackendUnavailable(err.to_string())
}

/// Map cosine [-1, 1] onto [0, 1]
pub fn normalize_cosine(cosine: f64) -> f64 {
    ((cosine + 1.0) / 2.0).clamp(0.0, 1.0)
}
