//! Map-reduce summarization over token-bounded chunks.
//!
//! Each chunk is summarized on its own (map). The partial summaries are then
//! joined and summarized once more (reduce). When the joined partials are
//! still larger than the collapse limit they are re-chunked and mapped again
//! before the final reduce.

use crate::chunking::{ChunkingConfig, TiktokenTokenizer, TokenChunker};
use crate::config::{Prompts, Settings};
use crate::error::{BriefError, Result};
use crate::llm::{GenerationRequest, Generator};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Upper bound on collapse rounds before reducing regardless of size.
const MAX_COLLAPSE_ROUNDS: usize = 4;

/// Per-call summary options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryOptions {
    /// Output language for the final summary.
    pub language: Option<String>,
    /// Token cap for the final summary.
    pub max_length: Option<u32>,
}

/// Summarizer that handles inputs larger than any single model call.
pub struct MapReduceSummarizer {
    generator: Arc<dyn Generator>,
    chunker: TokenChunker,
    prompts: Prompts,
    max_concurrent: usize,
    collapse_limit: usize,
    default_language: String,
}

impl MapReduceSummarizer {
    pub fn new(generator: Arc<dyn Generator>, chunker: TokenChunker) -> Self {
        let collapse_limit = chunker.config().chunk_size * 3;
        Self {
            generator,
            chunker,
            prompts: Prompts::default(),
            max_concurrent: 4,
            collapse_limit,
            default_language: "English".to_string(),
        }
    }

    /// Build a summarizer from the summarization and prompt settings.
    pub fn from_settings(generator: Arc<dyn Generator>, settings: &Settings) -> Result<Self> {
        let summarization = &settings.summarization;

        let tokenizer = Arc::new(TiktokenTokenizer::from_encoding(&summarization.encoding)?);
        let chunker = TokenChunker::new(
            tokenizer,
            ChunkingConfig::new(summarization.chunk_size, summarization.chunk_overlap)?,
        )?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self::new(generator, chunker)
            .with_prompts(prompts)
            .with_max_concurrent(summarization.max_concurrent)
            .with_default_language(summarization.default_language.clone()))
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the maximum number of concurrent map calls.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Set the token size above which partial summaries are collapsed again.
    pub fn with_collapse_limit(mut self, tokens: usize) -> Self {
        self.collapse_limit = tokens;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Summarize arbitrary-length text.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        if text.trim().is_empty() {
            return Err(BriefError::InvalidInput("Nothing to summarize".to_string()));
        }

        let mut partials = self.map(text).await?;
        info!("Mapped text into {} partial summaries", partials.len());

        let mut joined = partials.join("\n");
        let mut rounds = 0;
        while partials.len() > 1 && self.chunker.tokenizer().count(&joined) > self.collapse_limit {
            if rounds == MAX_COLLAPSE_ROUNDS {
                warn!("Partial summaries still exceed the collapse limit, reducing anyway");
                break;
            }
            partials = self.map(&joined).await?;
            joined = partials.join("\n");
            rounds += 1;
            debug!("Collapse round {} left {} partials", rounds, partials.len());
        }

        self.reduce(&joined, options).await
    }

    /// Summarize each chunk independently, preserving chunk order.
    async fn map(&self, text: &str) -> Result<Vec<String>> {
        let chunks = self.chunker.split(text)?;

        stream::iter(chunks)
            .map(|chunk| {
                let mut vars = HashMap::new();
                vars.insert("text".to_string(), chunk.text);
                let prompt = self.prompts.render_with_custom(&self.prompts.summarize.map, &vars);
                let request =
                    GenerationRequest::new(prompt).with_system(self.prompts.summarize.system.clone());
                self.generator.generate(request)
            })
            .buffered(self.max_concurrent)
            .try_collect()
            .await
    }

    /// Combine partial summaries into the final summary.
    async fn reduce(&self, partials: &str, options: &SummaryOptions) -> Result<String> {
        let language = options
            .language
            .clone()
            .unwrap_or_else(|| self.default_language.clone());

        let mut vars = HashMap::new();
        vars.insert("text".to_string(), partials.to_string());
        vars.insert("language".to_string(), language);
        let prompt = self.prompts.render_with_custom(&self.prompts.summarize.combine, &vars);

        let mut request =
            GenerationRequest::new(prompt).with_system(self.prompts.summarize.system.clone());
        if let Some(max_length) = options.max_length {
            request = request.with_max_tokens(max_length);
        }

        self.generator.generate(request).await
    }
}
