//! In-memory vector store
//!
//! A linear-scan nearest-neighbor store with no indexing or eviction.
//! `add` and `search` serialize against each other through a read-write
//! lock; each query's pipeline run is otherwise independent.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{DomainError, SearchHit, VectorStore};

#[derive(Debug)]
struct StoredVector {
    vector: Vec<f32>,
    metadata: HashMap<String, String>,
}

/// Process-local vector store using cosine similarity
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    vectors: RwLock<Vec<StoredVector>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vectors.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(
        &self,
        vector: Vec<f32>,
        metadata: HashMap<String, String>,
    ) -> Result<(), DomainError> {
        if vector.is_empty() {
            return Err(DomainError::validation("vector must not be empty"));
        }
        let mut vectors = self
            .vectors
            .write()
            .map_err(|_| DomainError::validation("vector store lock poisoned"))?;
        vectors.push(StoredVector { vector, metadata });
        Ok(())
    }

    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        let vectors = self
            .vectors
            .read()
            .map_err(|_| DomainError::validation("vector store lock poisoned"))?;
        if vectors.is_empty() || query.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let mut hits = Vec::with_capacity(vectors.len());
        for stored in vectors.iter() {
            let score = cosine_similarity(query, &stored.vector)?;
            hits.push(SearchHit::new(stored.metadata.clone(), score));
        }
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        Ok(hits)
    }
}

fn cosine_similarity(left: &[f32], right: &[f32]) -> Result<f32, DomainError> {
    if left.len() != right.len() {
        return Err(DomainError::validation("vector dimensions must match"));
    }
    let mut dot = 0.0f32;
    let mut left_magnitude = 0.0f32;
    let mut right_magnitude = 0.0f32;
    for (l, r) in left.iter().zip(right.iter()) {
        dot += l * r;
        left_magnitude += l * l;
        right_magnitude += r * r;
    }
    if left_magnitude == 0.0 || right_magnitude == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (left_magnitude.sqrt() * right_magnitude.sqrt()))
}
