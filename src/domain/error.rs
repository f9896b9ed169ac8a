use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Could not parse score from evaluator response: {response}")]
    EvaluationParse { response: String },

    #[error("Evaluator score out of range: {score}")]
    EvaluationRange { score: f32 },

    #[error("Could not parse compatibility result: {response}")]
    CompatibilityParse { response: String },

    #[error("Retrieval set must not be empty")]
    EmptyRetrievalSet,

    #[error("Query rewrite produced an empty result")]
    EmptyRewrite,

    #[error("Backend error: {provider} - {message}")]
    Backend { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn evaluation_parse(response: impl Into<String>) -> Self {
        Self::EvaluationParse {
            response: response.into(),
        }
    }

    pub fn evaluation_range(score: f32) -> Self {
        Self::EvaluationRange { score }
    }

    pub fn compatibility_parse(response: impl Into<String>) -> Self {
        Self::CompatibilityParse {
            response: response.into(),
        }
    }

    pub fn backend(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
