//! Text generation backend trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for text generation backends (Ollama, OpenAI, etc.)
///
/// The same backend serves two roles: judging (relevance scoring, strip
/// compatibility, query rewriting) and final answer generation.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Generate a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::fmt;
    use std::sync::Mutex;

    use super::*;

    type ResponseHandler = Box<dyn Fn(&str) -> Result<String, DomainError> + Send + Sync>;

    /// Mock LLM provider for testing
    ///
    /// Responses come from a fixed handler, a queue of canned responses, or a
    /// configured error, in that priority order. Every prompt is recorded so
    /// tests can assert which calls were made.
    pub struct MockLlmProvider {
        name: &'static str,
        handler: Option<ResponseHandler>,
        responses: Mutex<VecDeque<String>>,
        error: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                handler: None,
                responses: Mutex::new(VecDeque::new()),
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue a canned response
        pub fn with_response(self, response: impl Into<String>) -> Self {
            self.responses.lock().unwrap().push_back(response.into());
            self
        }

        /// Answer every prompt through the given handler
        pub fn with_handler<F>(mut self, handler: F) -> Self
        where
            F: Fn(&str) -> Result<String, DomainError> + Send + Sync + 'static,
        {
            self.handler = Some(Box::new(handler));
            self
        }

        /// Fail every call with the given error message
        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Prompts received so far, in call order
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl fmt::Debug for MockLlmProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("MockLlmProvider")
                .field("name", &self.name)
                .finish()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
            self.calls.lock().unwrap().push(prompt.to_string());

            if let Some(ref error) = self.error {
                return Err(DomainError::backend(self.name, error));
            }

            if let Some(ref handler) = self.handler {
                return handler(prompt);
            }

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| DomainError::backend(self.name, "No mock response configured"))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}

#[cfg(test)]
pub use mock::MockLlmProvider;
