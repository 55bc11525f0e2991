//! Chat-completion generator for OpenAI-compatible endpoints.

use super::{GenerationRequest, Generator};
use crate::config::LlmSettings;
use crate::error::{BriefError, Result};
use crate::openai::create_client_from_settings;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Generator backed by the chat completions API.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiGenerator {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_from_settings(settings)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    #[instrument(skip(self, request), fields(model = %self.model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(system) = request.system {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()
                    .map_err(|e| BriefError::Upstream(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt)
                .build()
                .map_err(|e| BriefError::Upstream(e.to_string()))?
                .into(),
        );

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature);
        if let Some(max_tokens) = request.max_tokens {
            builder.max_tokens(max_tokens);
        }
        let chat_request = builder
            .build()
            .map_err(|e| BriefError::Upstream(e.to_string()))?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            BriefError::Upstream(format!("Failed to generate response: {}", e))
        })?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| BriefError::Upstream("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated {} characters", text.chars().count());
        Ok(text)
    }
}
