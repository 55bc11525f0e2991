//! In-process stand-ins for the external providers

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use brief::document::TextExtractor;
use brief::llm::{GenerationRequest, Generator};
use brief::server::Providers;
use brief::speech::{SpeechAudio, SpeechSynthesizer};
use brief::youtube::{CommentSource, Fetched, TranscriptSource, VideoId};
use brief::{BriefError, Result};

/// Treats uploaded bytes as the document's text
pub struct Utf8Extractor;

impl TextExtractor for Utf8Extractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| BriefError::PdfExtraction(e.to_string()))
    }
}

/// Answers every prompt with `[<prompt>]`
#[derive(Default)]
pub struct EchoGenerator {
    pub calls: AtomicU32,
}

impl EchoGenerator {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{}]", request.prompt))
    }
}

/// Fails every call as an unreachable provider would
pub struct DownGenerator;

#[async_trait]
impl Generator for DownGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String> {
        Err(BriefError::Upstream("connection refused".to_string()))
    }
}

/// Returns a fake MP3 frame followed by the text
pub struct FakeSpeech;

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio> {
        let mut bytes = b"ID3".to_vec();
        bytes.extend_from_slice(text.as_bytes());
        Ok(SpeechAudio::mp3(bytes))
    }
}

/// Serves fixed text per video id; anything else is unavailable
#[derive(Default)]
pub struct StaticSource {
    pub texts: HashMap<String, String>,
    pub label: &'static str,
}

impl StaticSource {
    pub fn new(label: &'static str) -> Self {
        Self {
            texts: HashMap::new(),
            label,
        }
    }

    pub fn with(mut self, id: &str, text: &str) -> Self {
        self.texts.insert(id.to_string(), text.to_string());
        self
    }

    fn lookup(&self, video: &VideoId) -> Fetched {
        match self.texts.get(video.as_str()) {
            Some(text) => Fetched::Text(text.clone()),
            None => Fetched::Unavailable(format!(
                "{} not available: disabled for {}",
                self.label, video
            )),
        }
    }
}

#[async_trait]
impl TranscriptSource for StaticSource {
    async fn fetch_transcript(&self, video: &VideoId) -> Result<Fetched> {
        Ok(self.lookup(video))
    }
}

#[async_trait]
impl CommentSource for StaticSource {
    async fn fetch_comments(&self, video: &VideoId) -> Result<Fetched> {
        Ok(self.lookup(video))
    }
}

/// Providers wired entirely to fakes
pub fn providers(generator: Arc<EchoGenerator>) -> Providers {
    Providers {
        extractor: Arc::new(Utf8Extractor),
        generator,
        speech: Arc::new(FakeSpeech),
        transcripts: Arc::new(
            StaticSource::new("Transcript").with("dQw4w9WgXcQ", "never gonna give you up"),
        ),
        comments: Some(Arc::new(
            StaticSource::new("Comments").with("dQw4w9WgXcQ", "classic song"),
        )),
    }
}
