//! Request handlers.

use super::{ApiError, AppState};
use crate::document::{extract_batch, UploadedFile};
use crate::error::BriefError;
use crate::summarize::SummaryOptions;
use crate::youtube::{Fetched, VideoId};
use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Header carrying the answer text alongside answer audio.
pub const ANSWER_TEXT_HEADER: &str = "x-answer-text";

type ApiResult<T> = std::result::Result<T, ApiError>;

// === Request/Response Types ===

#[derive(Serialize)]
pub struct UploadResponse {
    message: String,
    text_length: usize,
}

#[derive(Deserialize)]
pub struct QuestionForm {
    question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    response: String,
}

#[derive(Deserialize)]
pub struct TextForm {
    text: String,
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    user_input: String,
    bot_response: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
pub struct SummarizeRequest {
    /// YouTube video URL
    url: String,
    #[serde(default)]
    max_length: Option<u32>,
}

#[derive(Deserialize)]
pub struct VideoSummaryRequest {
    /// YouTube video URL
    url: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    max_length: Option<u32>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    summary: String,
}

#[derive(Serialize)]
pub struct ContextLengthResponse {
    context_length: usize,
}

// === Handlers ===

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn upload_pdfs(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BriefError::InvalidInput(format!("Malformed upload: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| BriefError::InvalidInput(format!("Failed to read {}: {}", file_name, e)))?;
        files.push(UploadedFile::new(file_name, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(BriefError::InvalidInput("No files uploaded".to_string()).into());
    }

    let count = files.len();
    let extractor = state.extractor.clone();
    let max_files = state.max_upload_files;
    let text = tokio::task::spawn_blocking(move || extract_batch(extractor.as_ref(), &files, max_files))
        .await
        .map_err(|e| BriefError::PdfExtraction(format!("Extraction task failed: {}", e)))??;

    let text_length = text.chars().count();
    state.session.set(text);
    info!("Uploaded {} PDFs ({} characters)", count, text_length);

    Ok(Json(UploadResponse {
        message: format!("{} PDFs uploaded and text extracted.", count),
        text_length,
    }))
}

/// Answer a question against the session context.
async fn answer(state: &AppState, question: &str) -> ApiResult<String> {
    let context = state.session.get_non_empty().ok_or(BriefError::NoContext)?;
    Ok(state.qa.answer(&context, question).await?)
}

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QuestionForm>,
) -> ApiResult<Json<AnswerResponse>> {
    let response = answer(&state, &form.question).await?;
    Ok(Json(AnswerResponse { response }))
}

pub async fn ask_question_with_audio(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QuestionForm>,
) -> ApiResult<Response> {
    let response = answer(&state, &form.question).await?;
    let audio = state.speech.synthesize(&response).await?;

    let encoded: String = url::form_urlencoded::byte_serialize(response.as_bytes()).collect();
    let mut resp = audio_response(audio.bytes, &audio.content_type, "answer.mp3");
    if let Ok(value) = HeaderValue::from_str(&encoded) {
        resp.headers_mut()
            .insert(HeaderName::from_static(ANSWER_TEXT_HEADER), value);
    }
    Ok(resp)
}

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TextForm>,
) -> ApiResult<Response> {
    crate::speech::validate_text(&form.text)?;
    let audio = state.speech.synthesize(&form.text).await?;
    Ok(audio_response(audio.bytes, &audio.content_type, "speech.mp3"))
}

fn audio_response(bytes: Vec<u8>, content_type: &str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn store(state: &AppState, req: FeedbackRequest) -> ApiResult<Json<MessageResponse>> {
    state.feedback.append(&req.user_input, &req.bot_response).await?;
    Ok(Json(MessageResponse {
        message: "Feedback stored successfully.".to_string(),
    }))
}

pub async fn store_feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<Json<MessageResponse>> {
    store(&state, req).await
}

pub async fn store_feedback_form(
    State(state): State<Arc<AppState>>,
    Form(req): Form<FeedbackRequest>,
) -> ApiResult<Json<MessageResponse>> {
    store(&state, req).await
}

/// Summarize fetched text, passing unavailable placeholders straight through.
async fn summarize_fetched(
    state: &AppState,
    fetched: Fetched,
    options: SummaryOptions,
) -> ApiResult<Json<SummaryResponse>> {
    let summary = match fetched {
        Fetched::Text(text) => state.summarizer.summarize(&text, &options).await?,
        unavailable @ Fetched::Unavailable(_) => unavailable.into_text(),
    };
    Ok(Json(SummaryResponse { summary }))
}

pub async fn summarize_comments(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let video = VideoId::parse(&req.url)?;
    let comments = state.comments.as_ref().ok_or_else(|| {
        BriefError::Config("YouTube Data API key not configured (set YOUTUBE_API_KEY)".to_string())
    })?;

    let fetched = comments.fetch_comments(&video).await?;
    let options = SummaryOptions {
        language: None,
        max_length: Some(req.max_length.unwrap_or(state.default_max_length)),
    };
    summarize_fetched(&state, fetched, options).await
}

pub async fn summarize_video(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VideoSummaryRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let video = VideoId::parse(&req.url)?;
    let fetched = state.transcripts.fetch_transcript(&video).await?;
    let options = SummaryOptions {
        language: req.language,
        max_length: Some(req.max_length.unwrap_or(state.default_max_length)),
    };
    summarize_fetched(&state, fetched, options).await
}

pub async fn pdf_context_length(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ContextLengthResponse {
        context_length: state.session.len(),
    })
}

pub async fn clear_context(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.clear();
    Json(MessageResponse {
        message: "PDF context cleared.".to_string(),
    })
}
