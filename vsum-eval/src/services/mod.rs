//! Summary evaluation engine components
//!
//! Leaf-first: normalizer, the three independent scorers (lexical, semantic,
//! length), the aggregator/classifier, the recommendation generator and the
//! orchestrating `SummaryEvaluator`.

pub mod aggregator;
pub mod embedding;
pub mod evaluator;
pub mod length_analyzer;
pub mod lexical_scorer;
pub mod normalizer;
pub mod recommendations;
pub mod semantic_scorer;

pub use aggregator::{aggregate, Aggregate};
pub use embedding::{
    EmbeddingBackend, EmbeddingCache, EmbeddingError, HashingEmbedder, HttpEmbeddingBackend,
    UnavailableBackend,
};
pub use evaluator::SummaryEvaluator;
pub use length_analyzer::analyze_length;
pub use lexical_scorer::{rouge_l, score_lexical};
pub use normalizer::{normalize, NormalizeError, NormalizedText};
pub use recommendations::generate_recommendations;
pub use semantic_scorer::SemanticScorer;
