//! Recommendation Generator
//!
//! Each configured rule inspects one sub-metric and, when triggered, adds one
//! message. Rules are independent and may all fire. Output is ordered by rule
//! stage (semantic, lexical, length, overall), then by table position.

use crate::models::{
    LengthAnalysis, LexicalMetrics, PerformanceLevel, RecommendationRule, RuleCondition,
    ScoringParams, SemanticMetrics,
};

/// Generate rule-based recommendations
///
/// `semantic = None` (signal unavailable) skips semantic rules. Never fails;
/// returns an empty list when nothing triggers.
pub fn generate_recommendations(
    lexical: &LexicalMetrics,
    semantic: Option<&SemanticMetrics>,
    length: &LengthAnalysis,
    performance_level: PerformanceLevel,
    params: &ScoringParams,
) -> Vec<String> {
    let mut fired: Vec<&RecommendationRule> = params
        .recommendations
        .iter()
        .filter(|rule| triggers(rule.condition, lexical, semantic, length, performance_level, params))
        .collect();

    // sort_by_key is stable, so rules keep table order within a stage
    fired.sort_by_key(|rule| rule.condition.stage());

    fired
        .into_iter()
        .filter_map(|rule| match (&rule.message, rule.condition) {
            (Some(message), _) => Some(message.clone()),
            (None, RuleCondition::LengthOutsideBand) => Some(length.length_feedback.clone()),
            (None, _) => None,
        })
        .filter(|message| !message.is_empty())
        .collect()
}

fn triggers(
    condition: RuleCondition,
    lexical: &LexicalMetrics,
    semantic: Option<&SemanticMetrics>,
    length: &LengthAnalysis,
    performance_level: PerformanceLevel,
    params: &ScoringParams,
) -> bool {
    match condition {
        RuleCondition::SemanticBelow(threshold) => {
            semantic.is_some_and(|s| s.normalized_score < threshold)
        }
        RuleCondition::RecallBelow(threshold) => lexical.recall < threshold,
        RuleCondition::PrecisionBelow(threshold) => lexical.precision < threshold,
        RuleCondition::LengthOutsideBand => !params.length_penalty.in_band(length.length_ratio),
        RuleCondition::LevelIs(level) => performance_level == level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexical(precision: f64, recall: f64) -> LexicalMetrics {
        LexicalMetrics {
            precision,
            recall,
            f1: 0.0,
            rouge_l: 0.0,
        }
    }

    fn semantic(normalized: f64) -> SemanticMetrics {
        SemanticMetrics {
            cosine_similarity: normalized * 2.0 - 1.0,
            normalized_score: normalized,
        }
    }

    fn length(ratio: f64, feedback: &str) -> LengthAnalysis {
        LengthAnalysis {
            user_word_count: 10,
            reference_word_count: 10,
            length_ratio: ratio,
            length_feedback: feedback.to_string(),
        }
    }

    #[test]
    fn test_nothing_fires() {
        let params = ScoringParams::default();
        let recs = generate_recommendations(
            &lexical(0.9, 0.9),
            Some(&semantic(0.9)),
            &length(1.0, "appropriate length"),
            PerformanceLevel::Good,
            &params,
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_all_stages_fire_in_order() {
        let params = ScoringParams::default();
        let recs = generate_recommendations(
            &lexical(0.1, 0.1),
            Some(&semantic(0.5)),
            &length(0.2, "too short — missing key content"),
            PerformanceLevel::Poor,
            &params,
        );
        assert_eq!(
            recs,
            vec![
                "Focus on explaining the core ideas in your own words",
                "Try to cover more key concepts from the material",
                "Stay closer to the topics the material actually covers",
                "too short — missing key content",
                "Rewatch the video and note its main topic before summarizing",
            ]
        );
    }

    #[test]
    fn test_semantic_rules_skipped_when_unavailable() {
        let params = ScoringParams::default();
        let recs = generate_recommendations(
            &lexical(0.9, 0.9),
            None,
            &length(1.0, "appropriate length"),
            PerformanceLevel::Fair,
            &params,
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_excellent_gets_encouragement() {
        let params = ScoringParams::default();
        let recs = generate_recommendations(
            &lexical(1.0, 1.0),
            Some(&semantic(1.0)),
            &length(1.0, "appropriate length"),
            PerformanceLevel::Excellent,
            &params,
        );
        assert_eq!(
            recs,
            vec!["Excellent work! Continue practicing with more complex content"]
        );
    }

    #[test]
    fn test_order_enforced_regardless_of_table_order() {
        let mut params = ScoringParams::default();
        params.recommendations.reverse();
        let recs = generate_recommendations(
            &lexical(0.9, 0.1),
            Some(&semantic(0.1)),
            &length(3.0, "too long — focus on key points"),
            PerformanceLevel::Fair,
            &params,
        );
        assert_eq!(
            recs,
            vec![
                "Focus on explaining the core ideas in your own words",
                "Try to cover more key concepts from the material",
                "too long — focus on key points",
            ]
        );
    }
}
