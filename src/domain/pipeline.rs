//! Corrective retrieval pipeline
//!
//! Runs the RETRIEVE -> EVALUATE -> branch -> REFINE -> GENERATE state
//! machine exactly once per query. The three-way decision picks the branch:
//! trust local retrieval, supplement marginal retrieval with web results, or
//! escalate to web search entirely. Every failure path maps to one fixed
//! fallback message; no internal error ever escapes `answer`.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::decision::{Decision, RetrievalDecision};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::evaluator::RetrievalEvaluator;
use crate::domain::llm::LlmProvider;
use crate::domain::prompt::build_prompt;
use crate::domain::refiner::KnowledgeRefiner;
use crate::domain::rewriter::QueryRewriter;
use crate::domain::thresholds::Thresholds;
use crate::domain::vector_store::VectorStore;
use crate::domain::web_search::{WebSearchGateway, WebSearchProvider};
use crate::domain::DomainError;

const DEFAULT_TOP_K: usize = 3;

/// Outcome of one pipeline run: a generated answer or a typed fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RagOutcome {
    Answer(String),
    Fallback(FallbackReason),
}

impl RagOutcome {
    /// Flatten the outcome into the user-facing answer text
    pub fn into_text(self) -> String {
        match self {
            Self::Answer(answer) => answer,
            Self::Fallback(reason) => reason.message().to_string(),
        }
    }
}

/// The condition that produced a fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing retrieved, or no retrieved hit carried usable text
    NoRelevantContext,
    /// Local retrieval was trusted but every refinement came back empty
    NoCompatibleRefinement,
    /// Web search escalation produced nothing usable
    WebSearchExhausted,
    /// The ambiguous branch ran out of contexts to work with
    AmbiguousExhausted,
    /// An internal error was caught at the pipeline boundary
    InternalError,
}

impl FallbackReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoRelevantContext => {
                "I could not find any relevant information in the knowledge base."
            }
            Self::NoCompatibleRefinement => {
                "Retrieved documents did not produce compatible refined context."
            }
            Self::WebSearchExhausted => {
                "Unable to retrieve relevant information from web search."
            }
            Self::AmbiguousExhausted => "Unable to retrieve sufficiently relevant information.",
            Self::InternalError => {
                "An error occurred while processing your request. Please try again."
            }
        }
    }
}

/// The corrective RAG pipeline
#[derive(Debug)]
pub struct CragPipeline<P, E, V, W>
where
    P: LlmProvider,
    E: EmbeddingProvider,
    V: VectorStore,
    W: WebSearchProvider,
{
    llm: Arc<P>,
    embedding: Arc<E>,
    vector_store: Arc<V>,
    evaluator: RetrievalEvaluator<P>,
    refiner: KnowledgeRefiner<P>,
    rewriter: QueryRewriter<P>,
    web_search: WebSearchGateway<W>,
    top_k: usize,
}

impl<P, E, V, W> CragPipeline<P, E, V, W>
where
    P: LlmProvider,
    E: EmbeddingProvider,
    V: VectorStore,
    W: WebSearchProvider,
{
    pub fn new(
        llm: Arc<P>,
        embedding: Arc<E>,
        vector_store: Arc<V>,
        web_provider: Arc<W>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            evaluator: RetrievalEvaluator::new(llm.clone(), thresholds),
            refiner: KnowledgeRefiner::new(llm.clone()),
            rewriter: QueryRewriter::new(llm.clone()),
            web_search: WebSearchGateway::new(web_provider),
            llm,
            embedding,
            vector_store,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a query, converting every internal error into the generic
    /// failure message at this single boundary
    pub async fn answer(&self, query: &str) -> String {
        match self.run(query).await {
            Ok(outcome) => outcome.into_text(),
            Err(e) => {
                error!(error = %e, "failed to process query");
                FallbackReason::InternalError.message().to_string()
            }
        }
    }

    /// Run the pipeline once, returning the typed outcome
    pub async fn run(&self, query: &str) -> Result<RagOutcome, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query must not be blank"));
        }

        let query_vector = self.embedding.embed(query).await?;
        let hits = self.vector_store.search(&query_vector, self.top_k).await?;
        if hits.is_empty() {
            warn!("no documents retrieved");
            return Ok(RagOutcome::Fallback(FallbackReason::NoRelevantContext));
        }

        let contexts: Vec<String> = hits
            .iter()
            .filter_map(|hit| hit.text())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .collect();
        if contexts.is_empty() {
            warn!("retrieved hits lacked usable context");
            return Ok(RagOutcome::Fallback(FallbackReason::NoRelevantContext));
        }

        let decision = self.evaluator.evaluate_overall(&contexts, query).await?;
        match decision.decision {
            Decision::Correct => self.answer_from_retrieved(query, &decision).await,
            Decision::Ambiguous => self.answer_from_ambiguous(query, &decision).await,
            Decision::Incorrect => self.answer_with_web_search(query).await,
        }
    }

    /// Correct branch: refine everything above the lower threshold
    async fn answer_from_retrieved(
        &self,
        query: &str,
        decision: &RetrievalDecision,
    ) -> Result<RagOutcome, DomainError> {
        let selected: Vec<String> = decision
            .docs_above_lower_threshold()
            .iter()
            .map(|doc| doc.original_text.clone())
            .collect();
        let refined = self.refine_all(query, &selected).await?;
        if refined.is_empty() {
            warn!("no compatible refined contexts produced from local retrieval");
            return Ok(RagOutcome::Fallback(FallbackReason::NoCompatibleRefinement));
        }

        self.generate(&refined, query).await
    }

    /// Incorrect branch: escalate fully to web search; the original
    /// passages are never consulted again
    async fn answer_with_web_search(&self, query: &str) -> Result<RagOutcome, DomainError> {
        let rewritten = self.rewriter.rewrite_for_web_search(query).await?;
        let web_results = self.web_search.search(&rewritten).await;
        if web_results.is_empty() {
            warn!("no web results found after query rewrite");
            return Ok(RagOutcome::Fallback(FallbackReason::WebSearchExhausted));
        }

        let texts: Vec<String> = web_results.into_iter().map(|p| p.text).collect();
        let refined = self.refine_all(query, &texts).await?;
        if refined.is_empty() {
            return Ok(RagOutcome::Fallback(FallbackReason::WebSearchExhausted));
        }

        self.generate(&refined, query).await
    }

    /// Ambiguous branch: trust the good docs, and supplement with web
    /// results only when bad docs signal weak corroboration
    async fn answer_from_ambiguous(
        &self,
        query: &str,
        decision: &RetrievalDecision,
    ) -> Result<RagOutcome, DomainError> {
        info!(
            total = decision.total(),
            good = decision.good_docs.len(),
            bad = decision.bad_docs.len(),
            "ambiguous branch doc split"
        );

        let mut combined: Vec<String> = decision
            .good_docs
            .iter()
            .map(|doc| doc.original_text.clone())
            .collect();

        if decision.bad_docs.is_empty() {
            info!("skipping web search supplementation, no bad docs present");
        } else {
            info!("triggering web search supplementation");
            let rewritten = self.rewriter.rewrite_for_web_search(query).await?;
            let web_results = self.web_search.search(&rewritten).await;
            combined.extend(web_results.into_iter().map(|p| p.text));
        }

        if combined.is_empty() {
            return Ok(RagOutcome::Fallback(FallbackReason::AmbiguousExhausted));
        }

        let refined = self.refine_all(query, &combined).await?;
        if refined.is_empty() {
            return Ok(RagOutcome::Fallback(FallbackReason::AmbiguousExhausted));
        }

        self.generate(&refined, query).await
    }

    /// Refine each context and drop the ones that come back empty
    async fn refine_all(
        &self,
        query: &str,
        contexts: &[String],
    ) -> Result<Vec<String>, DomainError> {
        let mut refined = Vec::with_capacity(contexts.len());
        for context in contexts {
            let result = self.refiner.refine(query, context).await?;
            if !result.trim().is_empty() {
                refined.push(result);
            }
        }
        info!(
            refined = refined.len(),
            total = contexts.len(),
            "contexts refined"
        );
        Ok(refined)
    }

    async fn generate(
        &self,
        contexts: &[String],
        query: &str,
    ) -> Result<RagOutcome, DomainError> {
        let prompt = build_prompt(contexts, query);
        let answer = self.llm.generate(&prompt).await?;
        Ok(RagOutcome::Answer(answer))
    }
}
