//! Language-model access.
//!
//! Everything above this module talks to a [`ModelClient`]; the Ollama HTTP
//! client is the production implementation and tests substitute stubs.

pub mod error;
pub mod ollama;
pub mod prompts;

pub use error::LlmError;
pub use ollama::OllamaClient;
pub use prompts::{PromptTemplate, PromptVars};

/// A blocking text-generation capability.
pub trait ModelClient {
    /// Render `template` with `vars` and return the model's raw text.
    fn generate(&self, template: PromptTemplate, vars: &PromptVars) -> Result<String, LlmError>;
}

impl<T: ModelClient + ?Sized> ModelClient for &T {
    fn generate(&self, template: PromptTemplate, vars: &PromptVars) -> Result<String, LlmError> {
        (**self).generate(template, vars)
    }
}

impl<T: ModelClient + ?Sized> ModelClient for Box<T> {
    fn generate(&self, template: PromptTemplate, vars: &PromptVars) -> Result<String, LlmError> {
        (**self).generate(template, vars)
    }
}
