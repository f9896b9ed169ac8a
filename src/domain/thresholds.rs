//! Relevance score thresholds

use serde::{Deserialize, Serialize};

use crate::domain::passage::Classification;
use crate::domain::DomainError;

/// The two score thresholds splitting passages into high/good/bad buckets
///
/// Configured once at construction and immutable for the process lifetime.
/// Boundary semantics are inclusive on both sides: a score equal to `upper`
/// classifies as correct, a score equal to `lower` as incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    lower: f32,
    upper: f32,
}

impl Thresholds {
    /// Create thresholds; requires `0 <= lower < upper <= 1`
    pub fn new(lower: f32, upper: f32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower >= upper {
            return Err(DomainError::configuration(format!(
                "invalid retrieval thresholds: require 0 <= lower ({}) < upper ({}) <= 1",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    /// Classify a score relative to the thresholds
    pub fn classify(&self, score: f32) -> Classification {
        if score >= self.upper {
            Classification::Correct
        } else if score <= self.lower {
            Classification::Incorrect
        } else {
            Classification::Ambiguous
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lower: 0.3,
            upper: 0.8,
        }
    }
}
