//! Speak command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::speech::{OpenAiSpeech, SpeechSynthesizer};
use anyhow::Result;

/// Synthesize text to an audio file.
pub async fn run_speak(text: &str, output: &str, settings: Settings) -> Result<()> {
    let speech = OpenAiSpeech::new(&settings.llm, &settings.speech)?;
    let audio = speech.synthesize(text).await?;

    tokio::fs::write(output, &audio.bytes).await?;
    Output::success(&format!("Wrote {} bytes to {}", audio.bytes.len(), output));

    Ok(())
}
