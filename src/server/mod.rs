//! HTTP API server.
//!
//! Exposes PDF question answering, YouTube summarization, speech synthesis
//! and feedback storage as REST endpoints.

mod error;
mod handlers;

pub use error::{ApiError, ErrorResponse};

use crate::config::Settings;
use crate::document::{PdfExtractor, TextExtractor};
use crate::error::Result;
use crate::feedback::FeedbackLog;
use crate::llm::{Generator, OpenAiGenerator};
use crate::qa::QaResponder;
use crate::session::SessionContext;
use crate::speech::{OpenAiSpeech, SpeechSynthesizer};
use crate::summarize::MapReduceSummarizer;
use crate::youtube::{CommentSource, TranscriptSource, YoutubeComments, YoutubeTranscripts};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// External collaborators used by the handlers.
pub struct Providers {
    pub extractor: Arc<dyn TextExtractor>,
    pub generator: Arc<dyn Generator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub transcripts: Arc<dyn TranscriptSource>,
    /// None when no YouTube Data API key is configured.
    pub comments: Option<Arc<dyn CommentSource>>,
}

impl Providers {
    /// Build the production providers from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let comments: Option<Arc<dyn CommentSource>> = match settings.youtube.resolved_api_key() {
            Some(key) => Some(Arc::new(YoutubeComments::new(
                key,
                settings.youtube.max_comments,
            ))),
            None => {
                warn!("No YouTube Data API key configured; comment summaries are disabled");
                None
            }
        };

        Ok(Self {
            extractor: Arc::new(PdfExtractor::new()),
            generator: Arc::new(OpenAiGenerator::new(&settings.llm)?),
            speech: Arc::new(OpenAiSpeech::new(&settings.llm, &settings.speech)?),
            transcripts: Arc::new(YoutubeTranscripts::new(
                settings.youtube.transcript_languages.clone(),
            )?),
            comments,
        })
    }
}

/// Shared application state.
pub struct AppState {
    pub session: SessionContext,
    pub extractor: Arc<dyn TextExtractor>,
    pub qa: QaResponder,
    pub summarizer: MapReduceSummarizer,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub transcripts: Arc<dyn TranscriptSource>,
    pub comments: Option<Arc<dyn CommentSource>>,
    pub feedback: FeedbackLog,
    pub max_upload_files: usize,
    pub default_max_length: u32,
}

impl AppState {
    /// Wire providers into handler state using the given settings.
    pub fn new(providers: Providers, settings: &Settings) -> Result<Self> {
        let summarizer = MapReduceSummarizer::from_settings(providers.generator.clone(), settings)?;

        Ok(Self {
            session: SessionContext::new(),
            extractor: providers.extractor,
            qa: QaResponder::new(providers.generator),
            summarizer,
            speech: providers.speech,
            transcripts: providers.transcripts,
            comments: providers.comments,
            feedback: FeedbackLog::new(settings.feedback_log_path()),
            max_upload_files: settings.server.max_upload_files,
            default_max_length: settings.summarization.default_max_length,
        })
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/upload-pdfs", post(handlers::upload_pdfs))
        .route("/ask-question", post(handlers::ask_question))
        .route("/ask-question-with-audio", post(handlers::ask_question_with_audio))
        .route("/text-to-speech", post(handlers::text_to_speech))
        .route("/store-feedback", post(handlers::store_feedback))
        .route("/store-feedback-form", post(handlers::store_feedback_form))
        .route("/summarize_comments", post(handlers::summarize_comments))
        .route("/summarize_videos", post(handlers::summarize_video))
        .route("/summarize_video", post(handlers::summarize_video))
        .route("/pdf-context-length", get(handlers::pdf_context_length))
        .route("/clear-context", post(handlers::clear_context))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let providers = Providers::from_settings(&settings)?;
    let state = Arc::new(AppState::new(providers, &settings)?);
    let app = router(state, settings.server.max_upload_bytes);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
