//! Tunable scoring parameters
//!
//! Every weight, threshold and message used by the scoring engine lives here as
//! named data with a compiled default. The `[scoring]` section of the TOML
//! config may override any of them; missing keys keep their defaults.
//!
//! Threshold tables are ordered bands with an inclusive lower bound and an
//! exclusive upper bound. `ScoringParams::validate` runs at startup and rejects
//! tables with gaps, overlaps or incomplete coverage, so lookups on validated
//! tables are total.

use serde::{Deserialize, Serialize};
use vsum_common::{Error, Result};

use super::evaluation::{PerformanceLevel, UnderstandingQuality};

// ============================================================================
// Threshold Tables
// ============================================================================

/// One band of a threshold table: `lower <= value < upper` maps to `outcome`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band<T> {
    pub lower: f64,
    pub upper: f64,
    pub outcome: T,
}

impl<T> Band<T> {
    pub fn new(lower: f64, upper: f64, outcome: T) -> Self {
        Self {
            lower,
            upper,
            outcome,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

/// Ordered, contiguous step function from a value to an outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable<T> {
    bands: Vec<Band<T>>,
}

impl<T> ThresholdTable<T> {
    pub fn new(bands: Vec<Band<T>>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[Band<T>] {
        &self.bands
    }

    /// Look up the outcome for a value
    ///
    /// Returns `None` for NaN or values outside the table's coverage.
    pub fn classify(&self, value: f64) -> Option<&T> {
        self.bands
            .iter()
            .find(|band| band.contains(value))
            .map(|band| &band.outcome)
    }

    /// Check the table is non-empty, contiguous and covers `[domain_low, domain_high]`
    ///
    /// An infinite `domain_high` requires the last band to be open-ended.
    pub fn validate(&self, name: &str, domain_low: f64, domain_high: f64) -> Result<()> {
        let (Some(first), Some(last)) = (self.bands.first(), self.bands.last()) else {
            return Err(Error::Config(format!("{}: table is empty", name)));
        };

        for (i, band) in self.bands.iter().enumerate() {
            if band.lower.is_nan() || band.upper.is_nan() || band.lower >= band.upper {
                return Err(Error::Config(format!(
                    "{}: band {} has invalid bounds [{}, {})",
                    name, i, band.lower, band.upper
                )));
            }
        }

        for (i, pair) in self.bands.windows(2).enumerate() {
            if pair[0].upper != pair[1].lower {
                return Err(Error::Config(format!(
                    "{}: bands {} and {} are not contiguous ({} != {})",
                    name,
                    i,
                    i + 1,
                    pair[0].upper,
                    pair[1].lower
                )));
            }
        }

        if first.lower > domain_low {
            return Err(Error::Config(format!(
                "{}: first band starts at {}, above {}",
                name, first.lower, domain_low
            )));
        }

        let covers_high = if domain_high.is_infinite() {
            last.upper == f64::INFINITY
        } else {
            last.upper > domain_high
        };
        if !covers_high {
            return Err(Error::Config(format!(
                "{}: last band ends at {}, does not cover {}",
                name, last.upper, domain_high
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Weights and Length Penalty
// ============================================================================

/// Blend weights for the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub lexical: f64,
    pub length: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: 0.5,
            lexical: 0.3,
            length: 0.2,
        }
    }
}

/// Length penalty shape
///
/// 1.0 inside `[appropriate_low, appropriate_high)`. Below the band the penalty
/// falls linearly to 0 at ratio 0; above it, to 0 at twice `appropriate_high`.
/// Never below `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthPenaltyParams {
    pub appropriate_low: f64,
    pub appropriate_high: f64,
    pub floor: f64,
}

impl Default for LengthPenaltyParams {
    fn default() -> Self {
        Self {
            appropriate_low: 0.7,
            appropriate_high: 1.4,
            floor: 0.3,
        }
    }
}

impl LengthPenaltyParams {
    pub fn in_band(&self, ratio: f64) -> bool {
        self.appropriate_low <= ratio && ratio < self.appropriate_high
    }

    pub fn penalty(&self, ratio: f64) -> f64 {
        let raw = if self.in_band(ratio) {
            1.0
        } else if ratio < self.appropriate_low {
            ratio / self.appropriate_low
        } else {
            1.0 - (ratio - self.appropriate_high) / self.appropriate_high
        };
        raw.clamp(self.floor, 1.0)
    }
}

// ============================================================================
// Understanding Quality
// ============================================================================

/// Row of the understanding-quality table; all minimums must be met
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnderstandingRule {
    /// Minimum normalized semantic score (0.0-1.0)
    pub min_semantic: f64,
    /// Minimum lexical F1 (0.0-1.0)
    pub min_lexical: f64,
    pub quality: UnderstandingQuality,
}

impl UnderstandingRule {
    pub fn new(min_semantic: f64, min_lexical: f64, quality: UnderstandingQuality) -> Self {
        Self {
            min_semantic,
            min_lexical,
            quality,
        }
    }

    pub fn matches(&self, semantic: f64, lexical: f64) -> bool {
        semantic >= self.min_semantic && lexical >= self.min_lexical
    }
}

fn default_understanding_rules() -> Vec<UnderstandingRule> {
    vec![
        UnderstandingRule::new(0.80, 0.20, UnderstandingQuality::Deep),
        UnderstandingRule::new(0.00, 0.35, UnderstandingQuality::SurfaceLevel),
        UnderstandingRule::new(0.65, 0.00, UnderstandingQuality::Partial),
        UnderstandingRule::new(0.00, 0.15, UnderstandingQuality::Partial),
        UnderstandingRule::new(0.00, 0.00, UnderstandingQuality::Minimal),
    ]
}

// ============================================================================
// Feedback and Recommendations
// ============================================================================

/// Headline feedback per performance level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMessages {
    pub excellent: String,
    pub good: String,
    pub fair: String,
    pub poor: String,
    /// Appended when the semantic signal was unavailable
    pub degraded_suffix: String,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            excellent: "Excellent! You have a comprehensive understanding of the video content."
                .to_string(),
            good: "Good job! You've understood most of the video content well. Minor details could be refined."
                .to_string(),
            fair: "You're getting there! You've captured several important points. Focus on connecting the main ideas."
                .to_string(),
            poor: "Your understanding seems quite different from the video content. Consider rewatching and focusing on the main concepts."
                .to_string(),
            degraded_suffix: " (Semantic analysis was unavailable; this score is based on word overlap and length only.)"
                .to_string(),
        }
    }
}

impl FeedbackMessages {
    pub fn for_level(&self, level: PerformanceLevel) -> &str {
        match level {
            PerformanceLevel::Excellent => &self.excellent,
            PerformanceLevel::Good => &self.good,
            PerformanceLevel::Fair => &self.fair,
            PerformanceLevel::Poor => &self.poor,
        }
    }
}

/// Recommendation output order: every semantic rule precedes every lexical rule, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleStage {
    Semantic,
    Lexical,
    Length,
    Overall,
}

/// Condition inspected by one recommendation rule
///
/// TOML form: `condition = { semantic_below = 0.75 }`,
/// `condition = "length_outside_band"`, `condition = { level_is = "Poor" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    /// Normalized semantic score below threshold (skipped when semantic is unavailable)
    SemanticBelow(f64),
    /// Lexical recall below threshold
    RecallBelow(f64),
    /// Lexical precision below threshold
    PrecisionBelow(f64),
    /// Length ratio outside the length penalty's appropriate band
    LengthOutsideBand,
    /// Final performance level equals the given level
    LevelIs(PerformanceLevel),
}

impl RuleCondition {
    pub fn stage(&self) -> RuleStage {
        match self {
            RuleCondition::SemanticBelow(_) => RuleStage::Semantic,
            RuleCondition::RecallBelow(_) | RuleCondition::PrecisionBelow(_) => RuleStage::Lexical,
            RuleCondition::LengthOutsideBand => RuleStage::Length,
            RuleCondition::LevelIs(_) => RuleStage::Overall,
        }
    }
}

/// One recommendation rule
///
/// `message = None` is only meaningful for `LengthOutsideBand`, where the
/// length analyzer's feedback is used as the recommendation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub condition: RuleCondition,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecommendationRule {
    pub fn new(condition: RuleCondition, message: impl Into<String>) -> Self {
        Self {
            condition,
            message: Some(message.into()),
        }
    }
}

fn default_recommendation_rules() -> Vec<RecommendationRule> {
    vec![
        RecommendationRule::new(
            RuleCondition::SemanticBelow(0.75),
            "Focus on explaining the core ideas in your own words",
        ),
        RecommendationRule::new(
            RuleCondition::RecallBelow(0.40),
            "Try to cover more key concepts from the material",
        ),
        RecommendationRule::new(
            RuleCondition::PrecisionBelow(0.30),
            "Stay closer to the topics the material actually covers",
        ),
        RecommendationRule {
            condition: RuleCondition::LengthOutsideBand,
            message: None,
        },
        RecommendationRule::new(
            RuleCondition::LevelIs(PerformanceLevel::Poor),
            "Rewatch the video and note its main topic before summarizing",
        ),
        RecommendationRule::new(
            RuleCondition::LevelIs(PerformanceLevel::Excellent),
            "Excellent work! Continue practicing with more complex content",
        ),
    ]
}

// ============================================================================
// Lexical
// ============================================================================

/// Lexical scorer options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalParams {
    /// Drop common function words before computing overlap
    pub remove_stop_words: bool,
    /// Leading tokens of each text compared by ROUGE-L (LCS cost is quadratic)
    pub rouge_max_tokens: usize,
}

impl Default for LexicalParams {
    fn default() -> Self {
        Self {
            remove_stop_words: true,
            rouge_max_tokens: 512,
        }
    }
}

// ============================================================================
// ScoringParams
// ============================================================================

fn default_length_feedback() -> ThresholdTable<String> {
    ThresholdTable::new(vec![
        Band::new(0.0, 0.3, "too short — missing key content".to_string()),
        Band::new(0.3, 0.7, "somewhat brief — consider adding more detail".to_string()),
        Band::new(0.7, 1.4, "appropriate length".to_string()),
        Band::new(1.4, 2.0, "somewhat long — consider being more concise".to_string()),
        Band::new(2.0, f64::INFINITY, "too long — focus on key points".to_string()),
    ])
}

fn default_classification() -> ThresholdTable<PerformanceLevel> {
    ThresholdTable::new(vec![
        Band::new(f64::NEG_INFINITY, 50.0, PerformanceLevel::Poor),
        Band::new(50.0, 70.0, PerformanceLevel::Fair),
        Band::new(70.0, 85.0, PerformanceLevel::Good),
        Band::new(85.0, f64::INFINITY, PerformanceLevel::Excellent),
    ])
}

/// All tunable scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub weights: ScoringWeights,
    pub length_penalty: LengthPenaltyParams,
    /// Length ratio → length feedback text
    pub length_feedback: ThresholdTable<String>,
    /// Score percentage → performance level
    pub classification: ThresholdTable<PerformanceLevel>,
    /// Ordered, first match wins; last row must be a catch-all
    pub understanding: Vec<UnderstandingRule>,
    pub feedback: FeedbackMessages,
    pub recommendations: Vec<RecommendationRule>,
    pub lexical: LexicalParams,
    /// Maximum number of items accepted by one batch evaluation
    pub max_batch_size: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            length_penalty: LengthPenaltyParams::default(),
            length_feedback: default_length_feedback(),
            classification: default_classification(),
            understanding: default_understanding_rules(),
            feedback: FeedbackMessages::default(),
            recommendations: default_recommendation_rules(),
            lexical: LexicalParams::default(),
            max_batch_size: 100,
        }
    }
}

impl ScoringParams {
    /// Reject parameter sets that could produce a partial lookup or a NaN score
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (name, value) in [
            ("semantic", w.semantic),
            ("lexical", w.lexical),
            ("length", w.length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if w.semantic + w.lexical + w.length <= 0.0 {
            return Err(Error::Config("weights must not all be zero".to_string()));
        }
        if w.lexical + w.length <= 0.0 {
            return Err(Error::Config(
                "weights.lexical + weights.length must be positive (needed when semantic scoring is unavailable)"
                    .to_string(),
            ));
        }

        let lp = &self.length_penalty;
        if !(0.0..=1.0).contains(&lp.floor) {
            return Err(Error::Config(format!(
                "length_penalty.floor must be in [0, 1], got {}",
                lp.floor
            )));
        }
        if !(lp.appropriate_low > 0.0 && lp.appropriate_low < lp.appropriate_high) {
            return Err(Error::Config(format!(
                "length_penalty band [{}, {}) is invalid",
                lp.appropriate_low, lp.appropriate_high
            )));
        }

        self.length_feedback
            .validate("length_feedback", 0.0, f64::INFINITY)?;
        self.classification.validate("classification", 0.0, 100.0)?;

        match self.understanding.last() {
            Some(rule) if rule.min_semantic <= 0.0 && rule.min_lexical <= 0.0 => {}
            _ => {
                return Err(Error::Config(
                    "understanding: last rule must be a catch-all (min_semantic = 0, min_lexical = 0)"
                        .to_string(),
                ))
            }
        }

        for (i, rule) in self.recommendations.iter().enumerate() {
            if rule.message.is_none() && rule.condition != RuleCondition::LengthOutsideBand {
                return Err(Error::Config(format!(
                    "recommendations[{}]: message is required for {:?}",
                    i, rule.condition
                )));
            }
        }

        if self.max_batch_size == 0 {
            return Err(Error::Config("max_batch_size must be at least 1".to_string()));
        }
        if self.lexical.rouge_max_tokens == 0 {
            return Err(Error::Config(
                "lexical.rouge_max_tokens must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
