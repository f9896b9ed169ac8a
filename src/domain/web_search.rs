//! Web search escalation path
//!
//! The gateway wraps a raw search provider, sanitizes what comes back and
//! caps the result count. Web search is best-effort supplementation: any
//! provider failure becomes an empty result, never an error for the caller.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

use crate::domain::passage::Passage;
use crate::domain::DomainError;

const DEFAULT_RESULT_LIMIT: usize = 3;
const UNTITLED: &str = "Untitled";

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern is valid"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A raw result as returned by the search provider
#[derive(Debug, Clone)]
pub struct RawSearchResult {
    pub title: String,
    pub snippet: String,
}

/// Trait for web search providers
#[async_trait]
pub trait WebSearchProvider: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Vec<RawSearchResult>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

/// Sanitizing, result-capping front for a web search provider
#[derive(Debug)]
pub struct WebSearchGateway<W>
where
    W: WebSearchProvider,
{
    provider: Arc<W>,
    result_limit: usize,
}

impl<W: WebSearchProvider> WebSearchGateway<W> {
    pub fn new(provider: Arc<W>) -> Self {
        Self {
            provider,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// Search the web for passages; never fails the caller
    pub async fn search(&self, query: &str) -> Vec<Passage> {
        match self.provider.search(query).await {
            Ok(results) => {
                let passages: Vec<Passage> = results
                    .into_iter()
                    .take(self.result_limit)
                    .filter_map(to_passage)
                    .collect();
                info!(
                    provider = self.provider.provider_name(),
                    count = passages.len(),
                    "web search returned results"
                );
                passages
            }
            Err(e) => {
                error!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "web search failed, continuing without results"
                );
                Vec::new()
            }
        }
    }
}

fn to_passage(result: RawSearchResult) -> Option<Passage> {
    let title = match result.title.trim() {
        "" => UNTITLED.to_string(),
        trimmed => trimmed.to_string(),
    };
    let snippet = sanitize_snippet(&result.snippet);
    let text = format!("Title: {}\nSnippet: {}", title, snippet);
    let source = format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"));
    Passage::new(text, source, title).ok()
}

/// Strip markup tags and collapse whitespace runs to single spaces
fn sanitize_snippet(snippet: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(snippet, "");
    WHITESPACE_RUN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}
