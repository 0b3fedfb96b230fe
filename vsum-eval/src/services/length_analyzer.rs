//! Length Analyzer
//!
//! Compares word counts independently of content match.

use crate::models::{LengthAnalysis, ThresholdTable};

/// Analyze candidate length against the reference
///
/// `length_ratio` is exactly `user_word_count / reference_word_count`. Both
/// counts come from normalized text, so the reference count is never zero; a
/// zero reference count is still handled by reporting a ratio of 0.
pub fn analyze_length(
    user_word_count: usize,
    reference_word_count: usize,
    feedback_table: &ThresholdTable<String>,
) -> LengthAnalysis {
    let length_ratio = if reference_word_count == 0 {
        0.0
    } else {
        user_word_count as f64 / reference_word_count as f64
    };

    let length_feedback = feedback_table
        .classify(length_ratio)
        .cloned()
        .unwrap_or_default();

    LengthAnalysis {
        user_word_count,
        reference_word_count,
        length_ratio,
        length_feedback,
    }
}
