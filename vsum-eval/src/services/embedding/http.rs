//! OpenAI-compatible embedding service client
//!
//! Talks to any server exposing `POST {base_url}/embeddings` with the OpenAI
//! request/response shape (OpenAI, text-embeddings-inference, Ollama, vLLM,
//! LocalAI). The model runs in that server; this client is created once at
//! startup and reused for every request.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{EmbeddingBackend, EmbeddingError};

const USER_AGENT: &str = concat!("vsum/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// HTTP embedding backend
pub struct HttpEmbeddingBackend {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpEmbeddingBackend {
    /// Create new client
    ///
    /// `base_url` is the API root (e.g. `http://127.0.0.1:8080/v1`); the
    /// `/embeddings` path is appended.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for HttpEmbeddingBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::Parse("empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            count = texts.len(),
            "Requesting embeddings"
        );

        let mut request = self.http_client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EmbeddingError::Network(format!("request timed out: {}", e))
            } else {
                EmbeddingError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(status.as_u16(), error_text));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Parse(e.to_string()))?;

        order_embeddings(parsed.data, texts.len())
    }
}

/// Put response vectors back in input order and check the count
fn order_embeddings(
    mut data: Vec<EmbeddingData>,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if data.len() != expected {
        return Err(EmbeddingError::Parse(format!(
            "expected {} embeddings, got {}",
            expected,
            data.len()
        )));
    }

    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }

    let vectors: Vec<Vec<f32>> = data.into_iter().map(|d| d.embedding).collect();

    if let Some(first) = vectors.first() {
        if let Some(bad) = vectors.iter().find(|v| v.len() != first.len()) {
            return Err(EmbeddingError::DimensionMismatch(first.len(), bad.len()));
        }
    }

    Ok(vectors)
}
