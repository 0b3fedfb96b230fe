//! Data models for vsum-eval

pub mod evaluation;
pub mod params;

pub use evaluation::{
    DetailedMetrics, EvaluationRequest, EvaluationResult, LengthAnalysis, LexicalMetrics,
    PerformanceLevel, SemanticMetrics, UnderstandingQuality,
};
pub use params::{
    Band, FeedbackMessages, LengthPenaltyParams, LexicalParams, RecommendationRule,
    RuleCondition, RuleStage, ScoringParams, ScoringWeights, ThresholdTable, UnderstandingRule,
};
