//! Passage types flowing through the corrective retrieval pipeline

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Relevance classification for an evaluated passage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Passage is strongly relevant to the query
    Correct,
    /// Passage relevance is uncertain
    Ambiguous,
    /// Passage is not relevant to the query
    Incorrect,
}

impl Classification {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous)
    }

    pub fn is_incorrect(&self) -> bool {
        matches!(self, Self::Incorrect)
    }
}

/// A unit of retrievable context, produced by ingestion or by web search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub source: String,
    pub title: String,
}

impl Passage {
    /// Create a passage; the text must not be blank
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation("passage text must not be blank"));
        }
        Ok(Self {
            text,
            source: source.into(),
            title: title.into(),
        })
    }
}

/// A passage with its judge-assigned relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedPassage {
    pub original_text: String,
    pub score: f32,
    pub classification: Classification,
}

impl EvaluatedPassage {
    /// Create an evaluated passage; blank text and out-of-range scores are rejected
    pub fn new(
        original_text: impl Into<String>,
        score: f32,
        classification: Classification,
    ) -> Result<Self, DomainError> {
        let original_text = original_text.into();
        if original_text.trim().is_empty() {
            return Err(DomainError::validation(
                "evaluated passage text must not be blank",
            ));
        }
        if score.is_nan() || !(0.0..=1.0).contains(&score) {
            return Err(DomainError::evaluation_range(score));
        }
        Ok(Self {
            original_text,
            score,
            classification,
        })
    }
}
