//! Summarize command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::llm::OpenAiGenerator;
use crate::summarize::{MapReduceSummarizer, SummaryOptions};
use crate::youtube::{
    CommentSource, Fetched, TranscriptSource, VideoId, YoutubeComments, YoutubeTranscripts,
};
use anyhow::Result;
use std::sync::Arc;

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    comments: bool,
    language: Option<String>,
    max_length: Option<u32>,
    settings: Settings,
) -> Result<()> {
    let video = VideoId::parse(url)?;

    let spinner = Output::spinner(if comments {
        "Fetching comments..."
    } else {
        "Fetching transcript..."
    });

    let fetched = if comments {
        let key = settings.youtube.resolved_api_key().ok_or_else(|| {
            anyhow::anyhow!("YouTube Data API key not configured. Set YOUTUBE_API_KEY.")
        })?;
        YoutubeComments::new(key, settings.youtube.max_comments)
            .fetch_comments(&video)
            .await?
    } else {
        YoutubeTranscripts::new(settings.youtube.transcript_languages.clone())?
            .fetch_transcript(&video)
            .await?
    };

    let text = match fetched {
        Fetched::Text(text) => text,
        Fetched::Unavailable(reason) => {
            spinner.finish_and_clear();
            Output::warning(&reason);
            return Ok(());
        }
    };

    spinner.set_message("Summarizing...");

    let generator = Arc::new(OpenAiGenerator::new(&settings.llm)?);
    let summarizer = MapReduceSummarizer::from_settings(generator, &settings)?;

    let options = SummaryOptions {
        language,
        max_length: Some(max_length.unwrap_or(settings.summarization.default_max_length)),
    };
    let summary = summarizer.summarize(&text, &options).await?;

    spinner.finish_and_clear();
    Output::summary(&format!("Summary of {}", video.watch_url()), &summary);

    Ok(())
}
