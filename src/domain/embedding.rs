//! Embedding backend trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for text embedding backends
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single text into a dense vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Mock embedding provider returning a fixed vector
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        vector: Vec<f32>,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(vector: Vec<f32>) -> Self {
            Self {
                vector,
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::backend("mock_embedding", error));
            }
            Ok(self.vector.clone())
        }

        fn provider_name(&self) -> &'static str {
            "mock_embedding"
        }
    }
}
