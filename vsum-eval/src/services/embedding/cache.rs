//! Request-scoped embedding cache
//!
//! Keyed by SHA-256 of the exact text. Lives only as long as one request (or
//! one batch), so no embedding state is shared between requests.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

type CacheKey = [u8; 32];

/// Embedding cache for one request or batch
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: HashMap<CacheKey, Arc<[f32]>>,
    hits: u64,
    misses: u64,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(text: &str) -> CacheKey {
        Sha256::digest(text.as_bytes()).into()
    }

    /// Look up a cached vector, counting the hit or miss
    pub fn get(&mut self, text: &str) -> Option<Arc<[f32]>> {
        match self.entries.get(&Self::key(text)) {
            Some(vector) => {
                self.hits += 1;
                Some(Arc::clone(vector))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a vector and return a shared handle to it
    pub fn insert(&mut self, text: &str, vector: Vec<f32>) -> Arc<[f32]> {
        let vector: Arc<[f32]> = vector.into();
        self.entries.insert(Self::key(text), Arc::clone(&vector));
        vector
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
