//! Brief - PDF question answering and YouTube summarization
//!
//! An HTTP service (and companion CLI) that keeps the text of uploaded PDFs
//! as a shared session context, answers questions about it, summarizes
//! YouTube transcripts and comment sections, and turns text into speech.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `document` - PDF batch validation and text extraction
//! - `session` - The shared document context
//! - `chunking` - Token-bounded text splitting
//! - `llm` - Text generation behind the `Generator` trait
//! - `summarize` - Map-reduce summarization
//! - `qa` - Question answering over the session context
//! - `youtube` - Video id parsing, transcripts and comments
//! - `speech` - Text-to-speech
//! - `feedback` - Append-only feedback log
//! - `server` - The HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use brief::config::Settings;
//! use brief::llm::OpenAiGenerator;
//! use brief::summarize::{MapReduceSummarizer, SummaryOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let generator = Arc::new(OpenAiGenerator::new(&settings.llm)?);
//!     let summarizer = MapReduceSummarizer::from_settings(generator, &settings)?;
//!
//!     let summary = summarizer
//!         .summarize("A very long document...", &SummaryOptions::default())
//!         .await?;
//!     println!("{}", summary);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod openai;
pub mod qa;
pub mod server;
pub mod session;
pub mod speech;
pub mod summarize;
pub mod youtube;

pub use error::{BriefError, Result};
