//! Question answering over the uploaded document context.

use crate::error::{BriefError, Result};
use crate::llm::{GenerationRequest, Generator};
use std::sync::Arc;
use tracing::{info, instrument};

/// Sends a context + question prompt to a generative model.
pub struct QaResponder {
    generator: Arc<dyn Generator>,
}

impl QaResponder {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Build the single prompt: context, a blank line, then the question.
    pub fn build_prompt(context: &str, question: &str) -> String {
        format!("{}\n\n{}", context, question)
    }

    /// Answer a question against the given context.
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    pub async fn answer(&self, context: &str, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(BriefError::InvalidInput("Question must not be empty".to_string()));
        }
        if context.is_empty() {
            return Err(BriefError::NoContext);
        }

        let prompt = Self::build_prompt(context, question);
        let answer = self.generator.generate(GenerationRequest::new(prompt)).await?;

        info!("Answered question with {} characters", answer.chars().count());
        Ok(answer)
    }
}
