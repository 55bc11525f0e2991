//! Generative model abstraction.

mod openai;

pub use openai::OpenAiGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// A single-turn prompt for a generative model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    /// Optional system instruction.
    pub system: Option<String>,
    /// User prompt.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Trait for text generation backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion and return only the generated text.
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}
