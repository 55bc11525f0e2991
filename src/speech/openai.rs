//! Speech synthesis via the OpenAI audio API.

use super::{validate_text, SpeechAudio, SpeechSynthesizer};
use crate::config::{LlmSettings, SpeechSettings};
use crate::error::{BriefError, Result};
use crate::openai::create_client_from_settings;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// MP3 speech synthesizer.
pub struct OpenAiSpeech {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
}

impl OpenAiSpeech {
    pub fn new(llm: &LlmSettings, speech: &SpeechSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_from_settings(llm)?,
            model: parse_model(&speech.model),
            voice: parse_voice(&speech.voice)?,
        })
    }
}

fn parse_model(name: &str) -> SpeechModel {
    match name {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

fn parse_voice(name: &str) -> Result<Voice> {
    match name.to_lowercase().as_str() {
        "alloy" => Ok(Voice::Alloy),
        "echo" => Ok(Voice::Echo),
        "fable" => Ok(Voice::Fable),
        "onyx" => Ok(Voice::Onyx),
        "nova" => Ok(Voice::Nova),
        "shimmer" => Ok(Voice::Shimmer),
        other => Err(BriefError::Config(format!("Unknown voice: {}", other))),
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio> {
        validate_text(text)?;

        let request = CreateSpeechRequestArgs::default()
            .input(text)
            .model(self.model.clone())
            .voice(self.voice.clone())
            .response_format(SpeechResponseFormat::Mp3)
            .build()
            .map_err(|e| BriefError::Upstream(e.to_string()))?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| BriefError::Upstream(format!("Speech synthesis failed: {}", e)))?;

        debug!("Synthesized {} bytes of audio", response.bytes.len());
        Ok(SpeechAudio::mp3(response.bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voice() {
        assert!(matches!(parse_voice("Nova"), Ok(Voice::Nova)));
        assert!(parse_voice("robot").is_err());
    }

    #[test]
    fn test_parse_model() {
        assert!(matches!(parse_model("tts-1-hd"), SpeechModel::Tts1Hd));
        assert!(matches!(parse_model("gpt-4o-mini-tts"), SpeechModel::Other(_)));
    }
}
