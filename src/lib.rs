//! Corrective RAG engine
//!
//! Answers natural-language questions by retrieving candidate context,
//! judging whether that context is actually usable, and correcting course
//! before generating an answer: trusted retrieval is refined strip by
//! strip, marginal retrieval is corroborated with web results, and useless
//! retrieval escalates to a rewritten web search.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use tracing::info;

use api::{AppState, EnginePipeline};
use domain::{CragPipeline, Thresholds};
use infrastructure::{
    IngestionService, InMemoryVectorStore, OllamaEmbeddingProvider, OllamaProvider,
    WikipediaSearchProvider,
};

pub use config::AppConfig;

/// Wire the pipeline from configuration, ingesting the source document
/// first when `ingestion.auto_run` is set
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let llm = Arc::new(OllamaProvider::new(&config.llm.base_url, &config.llm.model));
    let embedding = Arc::new(OllamaEmbeddingProvider::new(
        &config.embedding.endpoint,
        &config.embedding.model,
    ));
    let vector_store = Arc::new(InMemoryVectorStore::new());
    let web_search = Arc::new(WikipediaSearchProvider::with_base_url(
        &config.web_search.base_url,
    ));

    if config.ingestion.auto_run {
        let ingestion = IngestionService::new(
            embedding.clone(),
            vector_store.clone(),
            &config.ingestion.source_path,
            config.ingestion.chunk_size,
            config.ingestion.chunk_overlap,
        );
        let ingested = ingestion.ingest().await?;
        info!(chunks = ingested, "startup ingestion complete");
    }

    let thresholds = Thresholds::new(
        config.retrieval.lower_threshold,
        config.retrieval.upper_threshold,
    )?;
    let pipeline: EnginePipeline =
        CragPipeline::new(llm, embedding, vector_store, web_search, thresholds)
            .with_top_k(config.retrieval.top_k);

    Ok(AppState {
        pipeline: Arc::new(pipeline),
    })
}
