//! Token-bounded text chunking for summarization.
//!
//! Text is cut at fixed token boundaries (multiples of the chunk size). Every
//! chunk after the first also reaches back `overlap` tokens into its
//! predecessor, so a 3000-token text with size 1000 and overlap 10 yields
//! `[0, 1000)`, `[990, 2000)` and `[1990, 3000)`.
//!
//! When a window edge splits a multi-byte character it is shifted by a few
//! tokens. A window never starts past the end of the text already covered, so
//! shifting never drops tokens.

mod tokenizer;

pub use tokenizer::TiktokenTokenizer;

use crate::error::{BriefError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Offsets tried, in order, to move a window edge onto a valid UTF-8 edge.
const BOUNDARY_SHIFTS: [isize; 7] = [0, 1, -1, 2, -2, 3, -3];

/// Trait for converting text to and from model tokens.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Decode a token slice. Slices that split a multi-byte character may fail.
    fn decode(&self, tokens: &[u32]) -> Result<String>;

    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// A bounded slice of a larger text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Position of this chunk in the text.
    pub index: usize,
    /// Decoded chunk text.
    pub text: String,
    /// First token (inclusive).
    pub start_token: usize,
    /// Last token (exclusive).
    pub end_token: usize,
}

impl TextChunk {
    pub fn token_len(&self) -> usize {
        self.end_token - self.start_token
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Distance in tokens between chunk boundaries. This is the stride, not
    /// the window length: every chunk after the first also carries
    /// `chunk_overlap` tokens of its predecessor, so windows span up to
    /// `chunk_size + chunk_overlap` tokens.
    pub chunk_size: usize,
    /// Tokens shared with the previous chunk.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 10,
        }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let config = Self {
            chunk_size,
            chunk_overlap,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(BriefError::Config("chunk_size must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(BriefError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// The window `[start, end)` that follows a chunk ending at `boundary`.
pub fn next_window(boundary: usize, total: usize, config: &ChunkingConfig) -> (usize, usize) {
    let start = boundary.saturating_sub(config.chunk_overlap);
    let end = (boundary + config.chunk_size).min(total);
    (start, end)
}

/// Token windows for a text of `total` tokens whose edges need no shifting.
pub fn chunk_bounds(total: usize, config: &ChunkingConfig) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut boundary = 0;

    while boundary < total {
        let (start, end) = next_window(boundary, total, config);
        bounds.push((start, end));
        boundary = end;
    }

    bounds
}

/// Splits text into overlapping token-bounded chunks.
#[derive(Clone)]
pub struct TokenChunker {
    tokenizer: Arc<dyn Tokenizer>,
    config: ChunkingConfig,
}

impl TokenChunker {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { tokenizer, config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Split text into chunks. Empty text yields no chunks.
    pub fn split(&self, text: &str) -> Result<Vec<TextChunk>> {
        let tokens = self.tokenizer.encode(text);

        let mut chunks = Vec::new();
        // End of the previous chunk as actually decoded.
        let mut covered = 0;

        while covered < tokens.len() {
            let (start, end) = next_window(covered, tokens.len(), &self.config);
            let (start, end, text) = self.decode_window(&tokens, start, end, covered)?;
            chunks.push(TextChunk {
                index: chunks.len(),
                text,
                start_token: start,
                end_token: end,
            });
            covered = end;
        }

        debug!("Split {} tokens into {} chunks", tokens.len(), chunks.len());
        Ok(chunks)
    }

    /// Decode `tokens[start..end]`, shifting an edge that splits a multi-byte
    /// character. The start never moves past `covered`, the end always moves
    /// beyond it, and the final window keeps the last token.
    fn decode_window(
        &self,
        tokens: &[u32],
        start: usize,
        end: usize,
        covered: usize,
    ) -> Result<(usize, usize, String)> {
        let mut last_err = None;

        for front in BOUNDARY_SHIFTS {
            let Some(s) = start.checked_add_signed(front) else {
                continue;
            };
            if s > covered {
                continue;
            }
            for back in BOUNDARY_SHIFTS {
                let Some(e) = end.checked_add_signed(back) else {
                    continue;
                };
                if e <= covered || e > tokens.len() || (end == tokens.len() && e != end) {
                    continue;
                }
                match self.tokenizer.decode(&tokens[s..e]) {
                    Ok(text) => return Ok((s, e, text)),
                    Err(err) => last_err = Some(err),
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            BriefError::InvalidInput(format!("Empty token window {}..{}", start, end))
        }))
    }
}
