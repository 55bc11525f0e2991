//! BPE tokenizers backed by `tiktoken-rs`.

use super::Tokenizer;
use crate::error::{BriefError, Result};
use tiktoken_rs::CoreBPE;

/// Tokenizer using one of the OpenAI BPE encodings.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Load an encoding by name (cl100k_base, o200k_base, p50k_base, r50k_base).
    pub fn from_encoding(name: &str) -> Result<Self> {
        let bpe = match name {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "r50k_base" => tiktoken_rs::r50k_base(),
            other => {
                return Err(BriefError::Config(format!("Unknown tokenizer encoding: {}", other)))
            }
        }
        .map_err(|e| BriefError::Config(format!("Failed to load encoding {}: {}", name, e)))?;

        Ok(Self { bpe })
    }

    pub fn cl100k() -> Result<Self> {
        Self::from_encoding("cl100k_base")
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_with_special_tokens(text)
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| BriefError::InvalidInput(format!("Failed to decode tokens: {}", e)))
    }
}
