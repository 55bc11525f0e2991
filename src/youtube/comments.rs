//! Comment retrieval via the YouTube Data API v3.

use super::{join_fragments, CommentSource, Fetched, VideoId};
use crate::error::{BriefError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The Data API caps page size at 100.
const PAGE_SIZE: usize = 100;

/// Fetches top-level comment threads for a video.
pub struct YoutubeComments {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_comments: usize,
}

impl YoutubeComments {
    pub fn new(api_key: impl Into<String>, max_comments: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            max_comments,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn fetch_page(&self, video: &VideoId, page_token: Option<&str>) -> Result<PageOutcome> {
        let max_results = PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video.as_str()),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let resp = self
            .client
            .get(format!("{}/commentThreads", self.base_url))
            .query(&query)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ApiErrorBody>(&body).ok().map(|b| b.error);

            if let Some(err) = &error {
                if err.has_reason("commentsDisabled") || err.has_reason("videoNotFound") {
                    return Ok(PageOutcome::Unavailable(err.message.clone()));
                }
            }

            let message = error.map(|e| e.message).unwrap_or(body);
            return Err(BriefError::YouTube(format!("{} - {}", status.as_u16(), message)));
        }

        Ok(PageOutcome::Page(resp.json::<CommentThreadList>().await?))
    }
}

enum PageOutcome {
    Page(CommentThreadList),
    Unavailable(String),
}

#[async_trait]
impl CommentSource for YoutubeComments {
    #[instrument(skip(self), fields(video = %video))]
    async fn fetch_comments(&self, video: &VideoId) -> Result<Fetched> {
        let mut comments: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = match self.fetch_page(video, page_token.as_deref()).await? {
                PageOutcome::Page(page) => page,
                PageOutcome::Unavailable(reason) => {
                    warn!("Comments unavailable for {}: {}", video, reason);
                    return Ok(Fetched::Unavailable(format!(
                        "Comments not available: {}",
                        reason
                    )));
                }
            };

            debug!("Fetched page with {} comment threads", page.items.len());
            comments.extend(
                page.items
                    .into_iter()
                    .map(|item| item.snippet.top_level_comment.snippet.text_display),
            );

            if comments.len() >= self.max_comments {
                comments.truncate(self.max_comments);
                break;
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!("Fetched {} comments", comments.len());

        if comments.is_empty() {
            return Ok(Fetched::Unavailable(
                "Comments not available: this video has no comments".to_string(),
            ));
        }

        Ok(Fetched::Text(join_fragments(comments)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadList {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: Comment,
}

#[derive(Debug, Deserialize)]
struct Comment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

impl ApiError {
    fn has_reason(&self, reason: &str) -> bool {
        self.errors.iter().any(|e| e.reason == reason)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}
