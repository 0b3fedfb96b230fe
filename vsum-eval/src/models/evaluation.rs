//! Evaluation request and result types
//!
//! `EvaluationResult` is the JSON contract consumed by the front-end. Field
//! names are part of that contract and must not be renamed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A learner summary to be scored against a reference summary
///
/// Immutable once constructed. Texts are validated (non-empty after
/// normalization) by the evaluator, not here, so that validation failures are
/// reported through the same error path as every other evaluation failure.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    user_text: String,
    reference_text: String,
    subject_id: Option<String>,
}

impl EvaluationRequest {
    /// Create new evaluation request
    ///
    /// `subject_id` is an opaque identifier (e.g. a video id) used only for logging.
    pub fn new(
        user_text: impl Into<String>,
        reference_text: impl Into<String>,
        subject_id: Option<String>,
    ) -> Self {
        Self {
            user_text: user_text.into(),
            reference_text: reference_text.into(),
            subject_id,
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn reference_text(&self) -> &str {
        &self.reference_text
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }
}

/// Qualitative performance tier derived from `score_percentage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceLevel {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Fair => "Fair",
            PerformanceLevel::Poor => "Poor",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical understanding label derived from semantic + lexical signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnderstandingQuality {
    /// Meaning matches and key vocabulary is present
    Deep,
    /// Vocabulary overlaps but meaning does not clearly match
    SurfaceLevel,
    /// Some of the content is captured
    Partial,
    /// Little or nothing of the content is captured
    Minimal,
}

impl UnderstandingQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnderstandingQuality::Deep => "deep",
            UnderstandingQuality::SurfaceLevel => "surface-level",
            UnderstandingQuality::Partial => "partial",
            UnderstandingQuality::Minimal => "minimal",
        }
    }
}

/// Word-overlap statistics between candidate and reference
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LexicalMetrics {
    /// |overlap| / |candidate| (0.0-1.0)
    pub precision: f64,
    /// |overlap| / |reference| (0.0-1.0)
    pub recall: f64,
    /// Harmonic mean of precision and recall (0.0-1.0)
    pub f1: f64,
    /// Longest-common-subsequence F-measure (0.0-1.0), diagnostic only
    pub rouge_l: f64,
}

/// Meaning-level similarity from vector embeddings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticMetrics {
    /// Cosine similarity (-1.0 to 1.0)
    pub cosine_similarity: f64,
    /// Cosine mapped to 0.0-1.0 for blending
    pub normalized_score: f64,
}

/// Word count comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthAnalysis {
    pub user_word_count: usize,
    pub reference_word_count: usize,
    /// Exactly `user_word_count / reference_word_count`
    pub length_ratio: f64,
    pub length_feedback: String,
}

/// Sub-metric breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    /// Raw cosine similarity, `None` (JSON null) when the semantic signal was unavailable
    pub semantic_similarity: Option<f64>,
    /// Reference coverage (lexical recall) scaled to 0-100
    pub comprehensiveness_score: u8,
    pub understanding_quality: UnderstandingQuality,
}

/// Complete assessment of one summary
///
/// Produced fresh per request and returned directly to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score_percentage: u8,
    pub performance_level: PerformanceLevel,
    pub feedback_message: String,
    pub length_analysis: LengthAnalysis,
    pub detailed_metrics: DetailedMetrics,
    pub recommendations: Vec<String>,
    pub lexical_metrics: LexicalMetrics,
    /// True when the semantic signal was unavailable and the score is lexical + length only
    pub degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_level_serializes_capitalized() {
        let json = serde_json::to_value(PerformanceLevel::Excellent).unwrap();
        assert_eq!(json, "Excellent");
        assert_eq!(PerformanceLevel::Poor.to_string(), "Poor");
    }

    #[test]
    fn test_understanding_quality_serializes_kebab_case() {
        let json = serde_json::to_value(UnderstandingQuality::SurfaceLevel).unwrap();
        assert_eq!(json, "surface-level");
        assert_eq!(UnderstandingQuality::SurfaceLevel.as_str(), "surface-level");
    }

    #[test]
    fn test_request_accessors() {
        let request = EvaluationRequest::new("mine", "theirs", Some("video-7".to_string()));
        assert_eq!(request.user_text(), "mine");
        assert_eq!(request.reference_text(), "theirs");
        assert_eq!(request.subject_id(), Some("video-7"));
    }

    #[test]
    fn test_degraded_semantic_similarity_is_null() {
        let metrics = DetailedMetrics {
            semantic_similarity: None,
            comprehensiveness_score: 40,
            understanding_quality: UnderstandingQuality::Partial,
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json["semantic_similarity"].is_null());
        assert_eq!(json["understanding_quality"], "partial");
    }
}
