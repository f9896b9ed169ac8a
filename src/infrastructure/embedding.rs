//! Ollama embedding provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainError, EmbeddingProvider};

const PROVIDER_NAME: &str = "ollama_embedding";

/// Embedding provider backed by the Ollama embeddings endpoint
///
/// `endpoint` is the full URL of the embeddings API, e.g.
/// `http://localhost:11434/api/embeddings`.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaEmbeddingProvider {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Option<Vec<f32>>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        debug!(text_len = text.len(), model = %self.model, "requesting embedding");

        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::backend(PROVIDER_NAME, format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| DomainError::backend(PROVIDER_NAME, format!("status error: {}", e)))?;

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            DomainError::backend(PROVIDER_NAME, format!("failed to parse response: {}", e))
        })?;

        match body.embedding {
            Some(embedding) if !embedding.is_empty() => Ok(embedding),
            _ => Err(DomainError::backend(
                PROVIDER_NAME,
                "embedding service returned no data",
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_embed_parses_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .and(body_partial_json(
                serde_json::json!({"model": "nomic-embed-text"}),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"embedding": [0.1, 0.2, 0.3]})),
            )
            .mount(&server)
            .await;

        let provider = OllamaEmbeddingProvider::new(
            format!("{}/api/embeddings", server.uri()),
            "nomic-embed-text",
        );
        let vector = provider.embed("some text").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_empty_embedding_is_a_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"embedding": []})),
            )
            .mount(&server)
            .await;

        let provider = OllamaEmbeddingProvider::new(
            format!("{}/api/embeddings", server.uri()),
            "nomic-embed-text",
        );
        assert!(matches!(
            provider.embed("some text").await,
            Err(DomainError::Backend { .. })
        ));
    }
}
