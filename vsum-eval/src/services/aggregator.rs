//! Score Aggregator & Classifier
//!
//! Blends semantic, lexical and length signals into one percentage and looks
//! up the performance level, comprehensiveness and understanding quality.
//!
//! ```text
//! raw   = w_sem * semantic.normalized_score + w_lex * lexical.f1 + w_len * length_penalty
//! score = clamp(round(raw * 100), 0, 100)
//! ```
//!
//! When the semantic signal is unavailable, `w_lex` and `w_len` are rescaled
//! to sum to 1 and the semantic term is dropped.

use crate::error::EvaluationError;
use crate::models::{
    LengthAnalysis, LexicalMetrics, PerformanceLevel, ScoringParams, SemanticMetrics,
    UnderstandingQuality,
};

/// Aggregated scores for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub score_percentage: u8,
    pub performance_level: PerformanceLevel,
    /// Lexical recall scaled to 0-100
    pub comprehensiveness_score: u8,
    pub understanding_quality: UnderstandingQuality,
    /// Length penalty used in the blend (floor..=1.0)
    pub length_penalty: f64,
}

/// Combine sub-metrics into the final score and labels
///
/// `semantic = None` means the semantic signal was unavailable.
///
/// # Errors
/// `EvaluationError::Internal` if the blend is not a finite number or a
/// lookup table has no matching entry. Neither happens with validated
/// parameters and in-range metrics.
pub fn aggregate(
    lexical: &LexicalMetrics,
    semantic: Option<&SemanticMetrics>,
    length: &LengthAnalysis,
    params: &ScoringParams,
) -> Result<Aggregate, EvaluationError> {
    let weights = &params.weights;
    let length_penalty = params.length_penalty.penalty(length.length_ratio);

    let raw = match semantic {
        Some(sem) => {
            let total = weights.semantic + weights.lexical + weights.length;
            (weights.semantic * sem.normalized_score
                + weights.lexical * lexical.f1
                + weights.length * length_penalty)
                / total
        }
        None => {
            let total = weights.lexical + weights.length;
            (weights.lexical * lexical.f1 + weights.length * length_penalty) / total
        }
    };

    if !raw.is_finite() {
        return Err(EvaluationError::Internal(format!(
            "blended score is not finite ({})",
            raw
        )));
    }

    let score_percentage = to_percentage(raw);

    let performance_level = *params
        .classification
        .classify(f64::from(score_percentage))
        .ok_or_else(|| {
            EvaluationError::Internal(format!(
                "no performance level covers score {}",
                score_percentage
            ))
        })?;

    let semantic_score = semantic.map_or(0.0, |s| s.normalized_score);
    let understanding_quality = params
        .understanding
        .iter()
        .find(|rule| rule.matches(semantic_score, lexical.f1))
        .map(|rule| rule.quality)
        .ok_or_else(|| {
            EvaluationError::Internal("no understanding rule matched".to_string())
        })?;

    Ok(Aggregate {
        score_percentage,
        performance_level,
        comprehensiveness_score: to_percentage(lexical.recall),
        understanding_quality,
        length_penalty,
    })
}

/// Scale a 0.0-1.0 fraction to a rounded, clamped percentage
fn to_percentage(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}
