//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{Fetched, TranscriptSource, VideoId, YoutubeTranscripts};
use anyhow::Result;

/// Print the joined transcript of a video.
pub async fn run_transcript(url: &str, settings: Settings) -> Result<()> {
    let video = VideoId::parse(url)?;
    let source = YoutubeTranscripts::new(settings.youtube.transcript_languages)?;

    match source.fetch_transcript(&video).await? {
        Fetched::Text(text) => println!("{}", text),
        Fetched::Unavailable(reason) => Output::warning(&reason),
    }

    Ok(())
}
