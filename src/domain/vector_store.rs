//! Vector store trait

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// A similarity hit returned from the vector store
///
/// `metadata["text"]` carries the passage text for retrieval hits.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub metadata: HashMap<String, String>,
    pub score: f32,
}

impl SearchHit {
    pub fn new(metadata: HashMap<String, String>, score: f32) -> Self {
        Self { metadata, score }
    }

    /// The passage text carried by this hit, if any
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").map(String::as_str)
    }
}

/// Trait for vector stores
///
/// `search` must return hits ordered by descending similarity. An empty
/// query vector or a zero `top_k` yields an empty result.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Store a vector with its metadata
    async fn add(
        &self,
        vector: Vec<f32>,
        metadata: HashMap<String, String>,
    ) -> Result<(), DomainError>;

    /// Find the `top_k` nearest stored vectors
    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Mock vector store returning preset hits from `search`
    #[derive(Debug, Default)]
    pub struct MockVectorStore {
        hits: Vec<SearchHit>,
    }

    impl MockVectorStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
            self.hits = hits;
            self
        }

        /// Convenience: one hit per text, with descending scores
        pub fn with_texts(self, texts: &[&str]) -> Self {
            let hits = texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let mut metadata = HashMap::new();
                    metadata.insert("text".to_string(), text.to_string());
                    SearchHit::new(metadata, 1.0 - i as f32 * 0.1)
                })
                .collect();
            self.with_hits(hits)
        }
    }

    #[async_trait]
    impl VectorStore for MockVectorStore {
        async fn add(
            &self,
            _vector: Vec<f32>,
            _metadata: HashMap<String, String>,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn search(
            &self,
            _query: &[f32],
            top_k: usize,
        ) -> Result<Vec<SearchHit>, DomainError> {
            Ok(self.hits.iter().take(top_k).cloned().collect())
        }
    }
}
