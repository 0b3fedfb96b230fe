//! Evaluation Orchestrator
//!
//! The public entry point of the engine. Validates both texts, runs the
//! lexical, semantic and length scorers independently, then aggregates and
//! builds recommendations.
//!
//! ```text
//! raw text ─► normalize ─┬─► score_lexical ──┐
//!                        ├─► score_semantic ─┼─► aggregate ─► recommendations ─► EvaluationResult
//!                        └─► analyze_length ─┘
//! ```
//!
//! The only shared state is the read-only embedding backend and parameters.
//! Embedding caches are created per call (or per batch) and dropped with it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use super::aggregator::aggregate;
use super::embedding::{EmbeddingBackend, EmbeddingCache};
use super::length_analyzer::analyze_length;
use super::lexical_scorer::score_lexical;
use super::normalizer::{normalize, NormalizedText};
use super::recommendations::generate_recommendations;
use super::semantic_scorer::SemanticScorer;
use crate::error::EvaluationError;
use crate::models::{
    DetailedMetrics, EvaluationRequest, EvaluationResult, ScoringParams, SemanticMetrics,
};

const PREVIEW_CHARS: usize = 50;

/// Summary evaluation engine
pub struct SummaryEvaluator {
    semantic: SemanticScorer,
    params: Arc<ScoringParams>,
}

impl SummaryEvaluator {
    /// Create evaluator
    ///
    /// `params` should already be validated (`ScoringParams::validate`);
    /// `timeout` bounds every embedding backend call.
    pub fn new(
        backend: Arc<dyn EmbeddingBackend>,
        params: ScoringParams,
        timeout: Duration,
    ) -> Self {
        Self {
            semantic: SemanticScorer::new(backend, timeout),
            params: Arc::new(params),
        }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn backend_name(&self) -> &'static str {
        self.semantic.backend_name()
    }

    /// Evaluate one summary
    ///
    /// # Errors
    /// - `InvalidInput` if either text has no words after normalization
    /// - `Internal` on an unexpected scoring fault
    ///
    /// Semantic backend failures never surface here: the result comes back
    /// with `degraded = true` instead.
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        let mut cache = EmbeddingCache::new();
        self.evaluate_with_cache(request, &mut cache).await
    }

    /// Evaluate several summaries in order, sharing one embedding cache
    ///
    /// One failing item does not affect the others.
    pub async fn evaluate_batch(
        &self,
        requests: &[EvaluationRequest],
    ) -> Vec<Result<EvaluationResult, EvaluationError>> {
        let mut cache = EmbeddingCache::new();
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            results.push(self.evaluate_with_cache(request, &mut cache).await);
        }

        debug!(
            items = requests.len(),
            cache_entries = cache.len(),
            cache_hits = cache.hits(),
            cache_misses = cache.misses(),
            "Batch evaluation finished"
        );

        results
    }

    async fn evaluate_with_cache(
        &self,
        request: &EvaluationRequest,
        cache: &mut EmbeddingCache,
    ) -> Result<EvaluationResult, EvaluationError> {
        let evaluation_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "evaluation",
            %evaluation_id,
            subject_id = request.subject_id().unwrap_or("-"),
        );

        self.run(request, cache).instrument(span).await
    }

    async fn run(
        &self,
        request: &EvaluationRequest,
        cache: &mut EmbeddingCache,
    ) -> Result<EvaluationResult, EvaluationError> {
        let started = Instant::now();

        debug!(
            user_preview = %preview(request.user_text()),
            reference_preview = %preview(request.reference_text()),
            "Evaluating summary"
        );

        let user = validated(request.user_text(), "user_text")?;
        let reference = validated(request.reference_text(), "reference_text")?;

        let params = &self.params;
        let semantic_fut =
            self.semantic
                .score_semantic(request.user_text(), request.reference_text(), cache);
        let local_fut = async {
            let lexical = score_lexical(user.tokens(), reference.tokens(), &params.lexical);
            let length = analyze_length(
                user.word_count(),
                reference.word_count(),
                &params.length_feedback,
            );
            (lexical, length)
        };

        let (semantic_result, (lexical, length)) = tokio::join!(semantic_fut, local_fut);

        let semantic: Option<SemanticMetrics> = match semantic_result {
            Ok(metrics) => Some(metrics),
            Err(EvaluationError::SemanticBackendUnavailable(reason)) => {
                warn!(
                    backend = self.backend_name(),
                    reason = %reason,
                    "Semantic scoring unavailable, falling back to lexical-only evaluation"
                );
                None
            }
            Err(e) => return Err(e),
        };
        let degraded = semantic.is_none();

        let agg = aggregate(&lexical, semantic.as_ref(), &length, params)?;

        let recommendations = generate_recommendations(
            &lexical,
            semantic.as_ref(),
            &length,
            agg.performance_level,
            params,
        );

        let mut feedback_message = params.feedback.for_level(agg.performance_level).to_string();
        if degraded {
            feedback_message.push_str(&params.feedback.degraded_suffix);
        }

        info!(
            score = agg.score_percentage,
            level = %agg.performance_level,
            degraded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Evaluation complete"
        );

        Ok(EvaluationResult {
            score_percentage: agg.score_percentage,
            performance_level: agg.performance_level,
            feedback_message,
            length_analysis: length,
            detailed_metrics: DetailedMetrics {
                semantic_similarity: semantic.map(|s| s.cosine_similarity),
                comprehensiveness_score: agg.comprehensiveness_score,
                understanding_quality: agg.understanding_quality,
            },
            recommendations,
            lexical_metrics: lexical,
            degraded,
        })
    }
}

fn validated(text: &str, field: &str) -> Result<NormalizedText, EvaluationError> {
    normalize(text).map_err(|e| {
        debug!(field, "Rejected evaluation input: {}", e);
        EvaluationError::InvalidInput(format!("{} {}", field, e))
    })
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PerformanceLevel, UnderstandingQuality};
    use crate::services::embedding::{HashingEmbedder, UnavailableBackend};

    fn evaluator() -> SummaryEvaluator {
        SummaryEvaluator::new(
            Arc::new(HashingEmbedder::default()),
            ScoringParams::default(),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_identical_texts_score_100() {
        let text = "Photosynthesis lets plants turn sunlight, water and carbon dioxide into glucose.";
        let result = evaluator()
            .evaluate(&EvaluationRequest::new(text, text, None))
            .await
            .unwrap();

        assert_eq!(result.score_percentage, 100);
        assert_eq!(result.performance_level, PerformanceLevel::Excellent);
        assert_eq!(result.detailed_metrics.understanding_quality, UnderstandingQuality::Deep);
        assert!(!result.degraded);
    }

    #[tokio::test]
    async fn test_empty_reference_rejected() {
        let result = evaluator()
            .evaluate(&EvaluationRequest::new("some words", " \n\t ", None))
            .await;
        match result {
            Err(EvaluationError::InvalidInput(msg)) => assert!(msg.starts_with("reference_text")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_degraded_flag_and_suffix() {
        let evaluator = SummaryEvaluator::new(
            Arc::new(UnavailableBackend::default()),
            ScoringParams::default(),
            Duration::from_secs(1),
        );
        let text = "rivers carry sediment to the sea";
        let result = evaluator
            .evaluate(&EvaluationRequest::new(text, text, Some("vid-1".into())))
            .await
            .unwrap();

        assert!(result.degraded);
        assert_eq!(result.detailed_metrics.semantic_similarity, None);
        assert_eq!(result.score_percentage, 100);
        assert!(result
            .feedback_message
            .ends_with(&ScoringParams::default().feedback.degraded_suffix));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(80);
        assert_eq!(preview(&long).len(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
