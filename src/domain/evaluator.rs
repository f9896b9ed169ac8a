//! Retrieval set evaluation
//!
//! Scores every retrieved passage through the judge, classifies each against
//! the thresholds, and aggregates the buckets into an overall three-way
//! decision.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;

use crate::domain::decision::{Decision, RetrievalDecision};
use crate::domain::judge::RelevanceJudge;
use crate::domain::llm::LlmProvider;
use crate::domain::passage::{Classification, EvaluatedPassage};
use crate::domain::thresholds::Thresholds;
use crate::domain::DomainError;

/// Evaluates a retrieved passage set against the configured thresholds
#[derive(Debug)]
pub struct RetrievalEvaluator<P>
where
    P: LlmProvider,
{
    judge: RelevanceJudge<P>,
    thresholds: Thresholds,
}

impl<P: LlmProvider> RetrievalEvaluator<P> {
    pub fn new(provider: Arc<P>, thresholds: Thresholds) -> Self {
        Self {
            judge: RelevanceJudge::new(provider),
            thresholds,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Evaluate a non-empty passage set and aggregate an overall decision
    ///
    /// Scoring calls run concurrently; bucket membership still reflects the
    /// original passage order. Judge failures propagate to the caller.
    pub async fn evaluate_overall(
        &self,
        passages: &[String],
        query: &str,
    ) -> Result<RetrievalDecision, DomainError> {
        if passages.is_empty() {
            return Err(DomainError::EmptyRetrievalSet);
        }

        let evaluated = try_join_all(
            passages
                .iter()
                .map(|passage| self.evaluate(query, passage)),
        )
        .await?;

        let mut high_docs = Vec::new();
        let mut good_docs = Vec::new();
        let mut bad_docs = Vec::new();
        for doc in evaluated {
            match doc.classification {
                Classification::Correct => high_docs.push(doc),
                Classification::Ambiguous => good_docs.push(doc),
                Classification::Incorrect => bad_docs.push(doc),
            }
        }

        let decision = decide(&high_docs, &good_docs);
        info!(
            total = passages.len(),
            high = high_docs.len(),
            good = good_docs.len(),
            bad = bad_docs.len(),
            upper = self.thresholds.upper(),
            lower = self.thresholds.lower(),
            ?decision,
            "retrieval set evaluated"
        );

        Ok(RetrievalDecision::new(decision, high_docs, good_docs, bad_docs))
    }

    /// Score and classify a single passage
    pub async fn evaluate(
        &self,
        query: &str,
        passage: &str,
    ) -> Result<EvaluatedPassage, DomainError> {
        let score = self.judge.score(query, passage).await?;
        let classification = self.thresholds.classify(score);
        EvaluatedPassage::new(passage, score, classification)
    }
}

fn decide(high_docs: &[EvaluatedPassage], good_docs: &[EvaluatedPassage]) -> Decision {
    if !high_docs.is_empty() {
        return Decision::Correct;
    }
    if good_docs.is_empty() {
        return Decision::Incorrect;
    }
    Decision::Ambiguous
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    /// Judge mock that maps each passage (quoted inside the prompt) to a score
    fn scoring_provider(scores: Vec<(&str, f32)>) -> Arc<MockLlmProvider> {
        let scores: Vec<(String, f32)> = scores
            .into_iter()
            .map(|(text, score)| (text.to_string(), score))
            .collect();
        Arc::new(MockLlmProvider::new("mock").with_handler(move |prompt| {
            scores
                .iter()
                .find(|(text, _)| prompt.contains(text))
                .map(|(_, score)| format!("score: {}", score))
                .ok_or_else(|| DomainError::backend("mock", "unexpected prompt"))
        }))
    }

    fn evaluator(provider: Arc<MockLlmProvider>) -> RetrievalEvaluator<MockLlmProvider> {
        RetrievalEvaluator::new(provider, Thresholds::new(0.3, 0.8).unwrap())
    }

    fn passages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_correct_decision_with_mixed_scores() {
        let provider = scoring_provider(vec![("alpha", 0.9), ("beta", 0.5), ("gamma", 0.1)]);
        let evaluator = evaluator(provider);

        let decision = evaluator
            .evaluate_overall(&passages(&["alpha", "beta", "gamma"]), "query")
            .await
            .unwrap();

        assert_eq!(decision.decision, Decision::Correct);
        assert_eq!(decision.high_docs.len(), 1);
        assert_eq!(decision.good_docs.len(), 1);
        assert_eq!(decision.bad_docs.len(), 1);

        let above = decision.docs_above_lower_threshold();
        assert_eq!(above.len(), 2);
        assert_eq!(above[0].original_text, "alpha");
        assert_eq!(above[1].original_text, "beta");
    }

    #[tokio::test]
    async fn test_ambiguous_decision_without_high_docs() {
        let provider = scoring_provider(vec![("alpha", 0.5), ("beta", 0.6)]);
        let evaluator = evaluator(provider);

        let decision = evaluator
            .evaluate_overall(&passages(&["alpha", "beta"]), "query")
            .await
            .unwrap();

        assert_eq!(decision.decision, Decision::Ambiguous);
        assert!(decision.high_docs.is_empty());
        assert_eq!(decision.good_docs.len(), 2);
        assert!(decision.bad_docs.is_empty());
    }

    #[tokio::test]
    async fn test_incorrect_decision_when_all_bad() {
        let provider = scoring_provider(vec![("alpha", 0.1), ("beta", 0.2)]);
        let evaluator = evaluator(provider);

        let decision = evaluator
            .evaluate_overall(&passages(&["alpha", "beta"]), "query")
            .await
            .unwrap();

        assert_eq!(decision.decision, Decision::Incorrect);
        assert_eq!(decision.bad_docs.len(), 2);
        assert!(decision.docs_above_lower_threshold().is_empty());
    }

    #[tokio::test]
    async fn test_boundary_scores() {
        // Exactly lower is bad, exactly upper is high
        let provider = scoring_provider(vec![("alpha", 0.3), ("beta", 0.8)]);
        let evaluator = evaluator(provider);

        let decision = evaluator
            .evaluate_overall(&passages(&["alpha", "beta"]), "query")
            .await
            .unwrap();

        assert_eq!(decision.decision, Decision::Correct);
        assert_eq!(decision.high_docs[0].original_text, "beta");
        assert_eq!(decision.bad_docs[0].original_text, "alpha");
        assert!(decision.good_docs.is_empty());
    }

    #[tokio::test]
    async fn test_bucket_order_preserves_input_order() {
        let provider = scoring_provider(vec![
            ("first-good", 0.5),
            ("first-high", 0.9),
            ("second-good", 0.6),
            ("second-high", 0.85),
        ]);
        let evaluator = evaluator(provider);

        let decision = evaluator
            .evaluate_overall(
                &passages(&["first-good", "first-high", "second-good", "second-high"]),
                "query",
            )
            .await
            .unwrap();

        assert_eq!(decision.high_docs[0].original_text, "first-high");
        assert_eq!(decision.high_docs[1].original_text, "second-high");
        assert_eq!(decision.good_docs[0].original_text, "first-good");
        assert_eq!(decision.good_docs[1].original_text, "second-good");
    }

    #[tokio::test]
    async fn test_empty_retrieval_set_is_an_error() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let evaluator = evaluator(provider);

        assert!(matches!(
            evaluator.evaluate_overall(&[], "query").await,
            Err(DomainError::EmptyRetrievalSet)
        ));
    }

    #[tokio::test]
    async fn test_judge_failure_propagates() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_response("not a score"));
        let evaluator = evaluator(provider);

        assert!(matches!(
            evaluator
                .evaluate_overall(&passages(&["alpha"]), "query")
                .await,
            Err(DomainError::EvaluationParse { .. })
        ));
    }
}
