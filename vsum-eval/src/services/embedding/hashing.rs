//! Deterministic feature-hashing embedder
//!
//! Projects normalized unigrams (weight 1.0) and adjacent bigrams (weight 0.5)
//! into a fixed number of buckets. SHA-256 of each feature picks the bucket and
//! the sign, so collisions tend to cancel instead of accumulating.
//!
//! This is not a language model: it measures vocabulary and local word order,
//! not meaning. It lets the service run without an external model and gives
//! tests exact, reproducible vectors.

use sha2::{Digest, Sha256};

use super::{EmbeddingBackend, EmbeddingError};
use crate::services::normalizer::normalize;

/// Default vector dimension (matches all-MiniLM-L6-v2)
pub const DEFAULT_DIMENSIONS: usize = 384;

const BIGRAM_WEIGHT: f32 = 0.5;

/// Local hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    /// Create embedder producing `dimensions`-long vectors (minimum 1)
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }

    /// Synchronous encoding, shared by the async trait method
    pub fn encode(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        // Texts without words map to the zero vector (cosine 0 against anything)
        let Ok(normalized) = normalize(text) else {
            return vector;
        };

        let tokens = normalized.tokens();
        for token in tokens {
            self.add_feature(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.add_feature(&mut vector, &bigram, BIGRAM_WEIGHT);
        }

        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for HashingEmbedder {
    fn name(&self) -> &'static str {
        "hashing"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.encode(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::embedding::cosine_similarity;

    #[test]
    fn test_deterministic() {
        let embedder = HashingEmbedder::default();
        let a = embedder.encode("Plants convert sunlight into chemical energy");
        let b = embedder.encode("Plants convert sunlight into chemical energy");
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_DIMENSIONS);
    }

    #[test]
    fn test_normalization_applied() {
        let embedder = HashingEmbedder::default();
        let a = embedder.encode("Plants, convert SUNLIGHT!");
        let b = embedder.encode("plants convert sunlight");
        assert_eq!(a, b);
    }

    #[test]
    fn test_related_closer_than_unrelated() {
        let embedder = HashingEmbedder::default();
        let reference = embedder.encode("plants use sunlight to make food through photosynthesis");
        let related = embedder.encode("plants make their food from sunlight by photosynthesis");
        let unrelated = embedder.encode("the stock market closed higher on friday afternoon");

        let close = cosine_similarity(&reference, &related).unwrap();
        let far = cosine_similarity(&reference, &unrelated).unwrap();
        assert!(close > far, "related {} should beat unrelated {}", close, far);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        assert!(embedder.encode("  ...  ").iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_zero_dimensions_clamped() {
        assert_eq!(HashingEmbedder::new(0).dimensions(), 1);
    }

    #[tokio::test]
    async fn test_trait_embed_matches_encode() {
        let embedder = HashingEmbedder::new(32);
        let via_trait = embedder.embed("light reactions").await.unwrap();
        assert_eq!(via_trait, embedder.encode("light reactions"));
    }
}
