//! Infrastructure layer - backend clients and process-local collaborators

pub mod embedding;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod vector_store;
pub mod web_search;

pub use embedding::OllamaEmbeddingProvider;
pub use ingestion::IngestionService;
pub use llm::OllamaProvider;
pub use vector_store::InMemoryVectorStore;
pub use web_search::WikipediaSearchProvider;
