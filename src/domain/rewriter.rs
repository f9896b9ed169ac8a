//! Query rewriting for web search escalation

use std::sync::Arc;

use tracing::info;

use crate::domain::llm::LlmProvider;
use crate::domain::DomainError;

/// Rewrites the original query into a search-engine-friendly form
#[derive(Debug)]
pub struct QueryRewriter<P>
where
    P: LlmProvider,
{
    provider: Arc<P>,
}

impl<P: LlmProvider> QueryRewriter<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Produce a concise, entity-preserving rewrite of the query
    pub async fn rewrite_for_web_search(&self, query: &str) -> Result<String, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query must not be blank"));
        }

        let prompt = build_rewrite_prompt(query);
        let rewritten = self.provider.generate(&prompt).await?.trim().to_string();
        if rewritten.is_empty() {
            return Err(DomainError::EmptyRewrite);
        }

        info!(rewritten = %rewritten, "query rewritten for web search");
        Ok(rewritten)
    }
}

fn build_rewrite_prompt(query: &str) -> String {
    format!(
        "Rewrite the user query for web search.\n\
         Requirements:\n\
         - concise\n\
         - preserve key entities\n\
         - optimized for search engine usage\n\
         Return only the rewritten query as plain text.\n\
         \n\
         Original query:\n{}\n",
        query
    )
}
