//! Wikipedia search provider

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{DomainError, RawSearchResult, WebSearchProvider};

const PROVIDER_NAME: &str = "wikipedia";
const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
const SEARCH_LIMIT: usize = 3;

/// Web search provider backed by the Wikipedia search API
#[derive(Debug, Clone)]
pub struct WikipediaSearchProvider {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaSearchProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for WikipediaSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Option<Vec<SearchEntry>>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl WebSearchProvider for WikipediaSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<RawSearchResult>, DomainError> {
        debug!(query = %query, "issuing wikipedia search");

        let limit = SEARCH_LIMIT.to_string();
        let response = self
            .client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("format", "json"),
                ("utf8", "1"),
                ("srlimit", limit.as_str()),
                ("srsearch", query),
            ])
            .send()
            .await
            .map_err(|e| DomainError::backend(PROVIDER_NAME, format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| DomainError::backend(PROVIDER_NAME, format!("status error: {}", e)))?;

        let body: SearchResponse = response.json().await.map_err(|e| {
            DomainError::backend(PROVIDER_NAME, format!("failed to parse response: {}", e))
        })?;

        let entries = body
            .query
            .and_then(|q| q.search)
            .unwrap_or_default();

        Ok(entries
            .into_iter()
            .map(|entry| RawSearchResult {
                title: entry.title,
                snippet: entry.snippet,
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
