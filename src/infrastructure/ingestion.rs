//! Document ingestion into the vector store

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::ingestion::chunk_text;
use crate::domain::{DomainError, EmbeddingProvider, VectorStore};

/// Loads a document, chunks it, embeds each chunk and stores the vectors
#[derive(Debug)]
pub struct IngestionService<E, V>
where
    E: EmbeddingProvider,
    V: VectorStore,
{
    embedding: Arc<E>,
    vector_store: Arc<V>,
    source_path: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl<E, V> IngestionService<E, V>
where
    E: EmbeddingProvider,
    V: VectorStore,
{
    pub fn new(
        embedding: Arc<E>,
        vector_store: Arc<V>,
        source_path: impl Into<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            embedding,
            vector_store,
            source_path: source_path.into(),
            chunk_size,
            chunk_overlap,
        }
    }

    /// Ingest the configured document; returns the number of stored chunks
    pub async fn ingest(&self) -> Result<usize, DomainError> {
        let document = tokio::fs::read_to_string(&self.source_path)
            .await
            .map_err(|e| {
                DomainError::configuration(format!(
                    "failed to read source document '{}': {}",
                    self.source_path, e
                ))
            })?;

        let chunks = chunk_text(&document, self.chunk_size, self.chunk_overlap)?;
        info!(
            characters = document.len(),
            chunks = chunks.len(),
            source = %self.source_path,
            "document loaded and chunked"
        );

        let mut ingested = 0;
        for (index, chunk) in chunks.iter().enumerate() {
            let vector = self.embedding.embed(chunk).await?;
            self.vector_store
                .add(vector, self.metadata_for(chunk, index))
                .await?;
            ingested += 1;
        }

        info!(embeddings = ingested, "vector store populated");
        Ok(ingested)
    }

    fn metadata_for(&self, chunk: &str, chunk_index: usize) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        metadata.insert("source_path".to_string(), self.source_path.clone());
        metadata.insert("chunk_index".to_string(), chunk_index.to_string());
        metadata.insert("text".to_string(), chunk.to_string());
        metadata
    }
}
