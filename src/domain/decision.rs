//! Overall retrieval decision types

use serde::{Deserialize, Serialize};

use crate::domain::passage::EvaluatedPassage;

/// Three-way decision over an evaluated retrieval set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// At least one passage scored at or above the upper threshold
    Correct,
    /// No high-confidence passage, but at least one marginal one
    Ambiguous,
    /// Every passage scored at or below the lower threshold
    Incorrect,
}

/// Result of evaluating a retrieval set against the thresholds
///
/// Every input passage lands in exactly one bucket; each bucket preserves
/// the original passage order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalDecision {
    pub decision: Decision,
    pub high_docs: Vec<EvaluatedPassage>,
    pub good_docs: Vec<EvaluatedPassage>,
    pub bad_docs: Vec<EvaluatedPassage>,
}

impl RetrievalDecision {
    pub fn new(
        decision: Decision,
        high_docs: Vec<EvaluatedPassage>,
        good_docs: Vec<EvaluatedPassage>,
        bad_docs: Vec<EvaluatedPassage>,
    ) -> Self {
        Self {
            decision,
            high_docs,
            good_docs,
            bad_docs,
        }
    }

    /// All passages scoring above the lower threshold, high-confidence first
    pub fn docs_above_lower_threshold(&self) -> Vec<&EvaluatedPassage> {
        self.high_docs.iter().chain(self.good_docs.iter()).collect()
    }

    pub fn total(&self) -> usize {
        self.high_docs.len() + self.good_docs.len() + self.bad_docs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passage::Classification;

    fn doc(text: &str, score: f32, classification: Classification) -> EvaluatedPassage {
        EvaluatedPassage::new(text, score, classification).unwrap()
    }

    #[test]
    fn test_docs_above_lower_threshold_ordering() {
        let decision = RetrievalDecision::new(
            Decision::Correct,
            vec![
                doc("high-1", 0.9, Classification::Correct),
                doc("high-2", 0.85, Classification::Correct),
            ],
            vec![doc("good-1", 0.5, Classification::Ambiguous)],
            vec![doc("bad-1", 0.1, Classification::Incorrect)],
        );

        let docs = decision.docs_above_lower_threshold();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].original_text, "high-1");
        assert_eq!(docs[1].original_text, "high-2");
        assert_eq!(docs[2].original_text, "good-1");
    }

    #[test]
    fn test_docs_above_lower_threshold_excludes_bad() {
        let decision = RetrievalDecision::new(
            Decision::Incorrect,
            vec![],
            vec![],
            vec![doc("bad-1", 0.1, Classification::Incorrect)],
        );

        assert!(decision.docs_above_lower_threshold().is_empty());
        assert_eq!(decision.total(), 1);
    }
}
