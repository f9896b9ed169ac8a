//! Domain layer - corrective retrieval logic and collaborator traits

pub mod decision;
pub mod embedding;
pub mod error;
pub mod evaluator;
pub mod ingestion;
pub mod judge;
pub mod llm;
pub mod passage;
pub mod pipeline;
pub mod prompt;
pub mod refiner;
pub mod rewriter;
pub mod thresholds;
pub mod vector_store;
pub mod web_search;

pub use decision::{Decision, RetrievalDecision};
pub use embedding::EmbeddingProvider;
pub use error::DomainError;
pub use evaluator::RetrievalEvaluator;
pub use judge::RelevanceJudge;
pub use llm::LlmProvider;
pub use passage::{Classification, EvaluatedPassage, Passage};
pub use pipeline::{CragPipeline, FallbackReason, RagOutcome};
pub use refiner::KnowledgeRefiner;
pub use rewriter::QueryRewriter;
pub use thresholds::Thresholds;
pub use vector_store::{SearchHit, VectorStore};
pub use web_search::{RawSearchResult, WebSearchGateway, WebSearchProvider};
