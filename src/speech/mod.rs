//! Text-to-speech synthesis.
//!
//! Audio is returned as an in-memory buffer and is never written to disk.

mod openai;

pub use openai::OpenAiSpeech;

use crate::error::{BriefError, Result};
use async_trait::async_trait;

/// Synthesized audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    /// Encoded audio bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`.
    pub content_type: String,
}

impl SpeechAudio {
    pub fn mp3(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: "audio/mpeg".to_string(),
        }
    }
}

/// Trait for speech synthesis backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize non-empty text into audio.
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio>;
}

/// Reject empty and whitespace-only input.
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(BriefError::InvalidInput("Text must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert!(validate_text("").is_err());
        assert!(validate_text("   ").is_err());
        assert!(validate_text("\n\t").is_err());
        assert!(validate_text("hi").is_ok());
    }
}
