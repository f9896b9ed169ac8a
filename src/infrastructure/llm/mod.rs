//! LLM provider implementations

mod ollama;

pub use ollama::OllamaProvider;
