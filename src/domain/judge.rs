//! LLM-backed relevance judge
//!
//! Asks the text generation backend to score (query, passage) pairs and to
//! answer strip compatibility questions. Both responses cross a free-text
//! boundary, so parsing is strict: anything outside the expected format is
//! an explicit error, never a silently defaulted score.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::llm::LlmProvider;
use crate::domain::DomainError;

static SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)score\s*[:=]\s*(0(?:\.\d+)?|1(?:\.0+)?)").expect("score pattern is valid")
});

/// Judge that scores passage relevance and strip compatibility
#[derive(Debug)]
pub struct RelevanceJudge<P>
where
    P: LlmProvider,
{
    provider: Arc<P>,
}

impl<P: LlmProvider> RelevanceJudge<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Score the relevance of a passage to a query, in `[0, 1]`
    pub async fn score(&self, query: &str, passage: &str) -> Result<f32, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query must not be blank"));
        }
        if passage.trim().is_empty() {
            return Err(DomainError::validation("passage must not be blank"));
        }

        let prompt = build_scoring_prompt(query, passage);
        let response = self.provider.generate(&prompt).await?;
        let score = parse_score(&response)?;

        debug!(score, "judge scored passage");
        Ok(score)
    }

    /// Ask whether a strip is compatible with the query
    pub async fn is_compatible(&self, query: &str, strip: &str) -> Result<bool, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query must not be blank"));
        }
        if strip.trim().is_empty() {
            return Err(DomainError::validation("strip must not be blank"));
        }

        let prompt = build_compatibility_prompt(query, strip);
        let response = self.provider.generate(&prompt).await?;
        parse_compatibility(&response)
    }
}

fn build_scoring_prompt(query: &str, passage: &str) -> String {
    format!(
        "Score the relevance of the retrieved context passage for the user query.\n\
         Return exactly one line in this format:\n\
         score: <number between 0 and 1>\n\
         \n\
         Query:\n{}\n\
         \n\
         Passage:\n{}\n",
        query, passage
    )
}

fn build_compatibility_prompt(query: &str, strip: &str) -> String {
    format!(
        "Determine whether the strip is compatible with the user query.\n\
         Return exactly one word: true or false.\n\
         \n\
         Query:\n{}\n\
         \n\
         Strip:\n{}\n",
        query, strip
    )
}

/// Parse a `score: <number>` line out of a judge response
fn parse_score(response: &str) -> Result<f32, DomainError> {
    let captures = SCORE_PATTERN
        .captures(response)
        .ok_or_else(|| DomainError::evaluation_parse(response))?;
    let score: f32 = captures[1]
        .parse()
        .map_err(|_| DomainError::evaluation_parse(response))?;
    if !(0.0..=1.0).contains(&score) {
        return Err(DomainError::evaluation_range(score));
    }
    Ok(score)
}

/// Parse a strict true/false compatibility answer
fn parse_compatibility(response: &str) -> Result<bool, DomainError> {
    let normalized = response.trim().to_lowercase();
    if normalized.starts_with("true") {
        return Ok(true);
    }
    if normalized.starts_with("false") {
        return Ok(false);
    }
    Err(DomainError::compatibility_parse(response))
}
