//! Transcript retrieval via `yt-transcript-rs`.

use super::{join_fragments, Fetched, TranscriptSource, VideoId};
use crate::error::{BriefError, Result};
use async_trait::async_trait;
use tracing::{info, instrument, warn};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches published or auto-generated captions for a video.
pub struct YoutubeTranscripts {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YoutubeTranscripts {
    /// Create a fetcher preferring the given languages, in order.
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| BriefError::Upstream(format!("Failed to create transcript client: {}", e)))?;

        Ok(Self { api, languages })
    }
}

/// Placeholder returned when no transcript can be retrieved.
pub(crate) fn unavailable(reason: impl std::fmt::Display) -> Fetched {
    Fetched::Unavailable(format!("Transcript not available: {}", reason))
}

/// Join snippet text; a transcript with no text is unavailable.
pub(crate) fn from_snippets<'a>(snippets: impl IntoIterator<Item = &'a str>) -> Fetched {
    let text = join_fragments(snippets.into_iter().filter(|s| !s.trim().is_empty()));
    if text.is_empty() {
        unavailable("the transcript has no text")
    } else {
        Fetched::Text(text)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    #[instrument(skip(self), fields(video = %video))]
    async fn fetch_transcript(&self, video: &VideoId) -> Result<Fetched> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        match self
            .api
            .fetch_transcript(video.as_str(), &languages, false)
            .await
        {
            Ok(transcript) => {
                info!(
                    "Fetched {} transcript snippets ({})",
                    transcript.snippets.len(),
                    transcript.language_code
                );
                Ok(from_snippets(
                    transcript.snippets.iter().map(|s| s.text.as_str()),
                ))
            }
            Err(e) => {
                // Disabled, missing and unavailable transcripts all land here.
                warn!("Transcript unavailable for {}: {}", video, e);
                Ok(unavailable(e))
            }
        }
    }
}
