//! No-op embedding backend
//!
//! Used when semantic scoring is disabled (`backend = "none"`) and in tests
//! that exercise the lexical-only fallback.

use super::{EmbeddingBackend, EmbeddingError};

/// Backend that always reports itself unavailable
#[derive(Debug, Clone, Default)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for UnavailableBackend {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let reason = if self.reason.is_empty() {
            "semantic scoring disabled".to_string()
        } else {
            self.reason.clone()
        };
        Err(EmbeddingError::Unavailable(reason))
    }
}
