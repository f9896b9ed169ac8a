//! Strip-level knowledge refinement
//!
//! Decomposes a passage into strips of consecutive sentences, keeps only the
//! strips the judge deems compatible with the query, and reassembles them.
//! This is the finer-grained filter beneath the passage-level evaluator.

use std::sync::Arc;

use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::domain::judge::RelevanceJudge;
use crate::domain::llm::LlmProvider;
use crate::domain::DomainError;

/// Number of consecutive sentences grouped into one strip
const SENTENCE_GROUP_SIZE: usize = 2;

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

/// Filters passage content down to query-compatible strips
#[derive(Debug)]
pub struct KnowledgeRefiner<P>
where
    P: LlmProvider,
{
    judge: RelevanceJudge<P>,
}

impl<P: LlmProvider> KnowledgeRefiner<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            judge: RelevanceJudge::new(provider),
        }
    }

    /// Refine a passage to its query-compatible strips, joined by newlines
    ///
    /// Returns an empty string when no strip survives; callers must treat
    /// that as "no usable refined content", not as a failure. Compatibility
    /// calls run concurrently, retained strips keep their original order.
    pub async fn refine(&self, query: &str, passage: &str) -> Result<String, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query must not be blank"));
        }
        if passage.trim().is_empty() {
            return Err(DomainError::validation("passage must not be blank"));
        }

        let strips = split_into_strips(passage);
        let verdicts = try_join_all(
            strips
                .iter()
                .map(|strip| self.judge.is_compatible(query, strip)),
        )
        .await?;

        let retained: Vec<String> = strips
            .into_iter()
            .zip(verdicts)
            .filter_map(|(strip, compatible)| compatible.then_some(strip))
            .collect();

        info!(
            retained = retained.len(),
            "knowledge refinement retained strips"
        );
        Ok(retained.join("\n"))
    }
}

/// Split a passage into sentences on terminal punctuation followed by whitespace
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Keep the terminal punctuation with its sentence
        let end = boundary.start() + 1;
        let fragment = text[start..end].trim();
        if !fragment.is_empty() {
            sentences.push(fragment.to_string());
        }
        start = boundary.end();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Group sentences into fixed-size strips; a trailing partial group still
/// forms its own strip
fn split_into_strips(passage: &str) -> Vec<String> {
    let sentences = split_sentences(passage);
    if sentences.is_empty() {
        return vec![passage.trim().to_string()];
    }
    sentences
        .chunks(SENTENCE_GROUP_SIZE)
        .map(|group| group.join(" "))
        .collect()
}
