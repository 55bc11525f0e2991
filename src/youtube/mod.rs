//! YouTube transcript and comment retrieval.
//!
//! Resolves a video identifier from a URL and fetches its transcript or
//! comment text. A video whose transcript (or comment section) cannot be
//! retrieved yields [`Fetched::Unavailable`] rather than an error.

mod comments;
mod transcript;

pub use comments::YoutubeComments;
pub use transcript::YoutubeTranscripts;

use crate::error::{BriefError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve a video ID from a YouTube URL or a bare ID.
    pub fn parse(input: &str) -> Result<Self> {
        extract_video_id(input)
            .map(VideoId)
            .ok_or_else(|| BriefError::InvalidVideoUrl(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches various YouTube URL formats and bare video IDs
        Regex::new(
            r"(?x)
            (?:
                # Path-style URLs
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/(?:embed|v|shorts|live)/|youtu\.be/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            (?:
                # Any youtube URL carrying a v= query parameter
                (?:https?://)?
                (?:www\.|m\.|music\.)?
                youtube\.com/.*[?&]v=
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("video id pattern is valid")
    })
}

/// Extract video ID from a YouTube URL or bare ID.
fn extract_video_id(input: &str) -> Option<String> {
    let caps = video_id_regex().captures(input.trim())?;

    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

/// Outcome of a transcript or comment fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// Fragments joined with single spaces, in source order.
    Text(String),
    /// The source has nothing to offer for this video; carries a readable reason.
    Unavailable(String),
}

impl Fetched {
    pub fn is_available(&self) -> bool {
        matches!(self, Fetched::Text(_))
    }

    /// Text when available, otherwise the human-readable placeholder.
    pub fn into_text(self) -> String {
        match self {
            Fetched::Text(text) => text,
            Fetched::Unavailable(reason) => reason,
        }
    }
}

/// Join fragments with single spaces, preserving order.
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript text for a video.
    async fn fetch_transcript(&self, video: &VideoId) -> Result<Fetched>;
}

/// Trait for comment providers.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch top-level comment text for a video.
    async fn fetch_comments(&self, video: &VideoId) -> Result<Fetched>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=shared&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?feature=shared",
            "https://youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            assert_eq!(
                VideoId::parse(url).unwrap().as_str(),
                "dQw4w9WgXcQ",
                "failed on {url}"
            );
        }
    }

    #[test]
    fn test_invalid_urls() {
        for input in ["not-a-video-id", "", "https://example.com/watch?x=1"] {
            let err = VideoId::parse(input).unwrap_err();
            assert!(matches!(err, BriefError::InvalidVideoUrl(_)));
        }
    }

    #[test]
    fn test_watch_url() {
        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_join_fragments() {
        assert_eq!(join_fragments(["never", "gonna", "give"]), "never gonna give");
        assert_eq!(join_fragments(Vec::<String>::new()), "");
    }

    #[test]
    fn test_unavailable_into_text_is_placeholder() {
        let fetched = Fetched::Unavailable("Transcript not available: disabled".to_string());
        assert!(!fetched.is_available());
        assert!(fetched.into_text().contains("not available"));
    }
}
