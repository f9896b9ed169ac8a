//! Ollama text generation provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainError, LlmProvider};

const PROVIDER_NAME: &str = "ollama";

/// Ollama API provider
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        debug!(prompt_len = prompt.len(), model = %self.model, "calling LLM backend");

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::backend(PROVIDER_NAME, format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| DomainError::backend(PROVIDER_NAME, format!("status error: {}", e)))?;

        let body: GenerateResponse = response.json().await.map_err(|e| {
            DomainError::backend(PROVIDER_NAME, format!("failed to parse response: {}", e))
        })?;

        match body.response {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(DomainError::backend(PROVIDER_NAME, "LLM response was empty")),
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
