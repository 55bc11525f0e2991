//! OpenAI client configuration with sensible defaults.

use crate::config::LlmSettings;
use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client from LLM settings.
///
/// A custom `api_base` points the client at any OpenAI-compatible endpoint.
pub fn create_client_from_settings(settings: &LlmSettings) -> Result<Client<OpenAIConfig>> {
    create_client_with(
        settings.api_base.as_deref(),
        Duration::from_secs(settings.timeout_seconds),
    )
}

/// Create an OpenAI client with a custom endpoint and timeout.
pub fn create_client_with(api_base: Option<&str>, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let mut config = OpenAIConfig::default();
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}
