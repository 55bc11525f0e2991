//! Error types for Brief.

use thiserror::Error;

/// Library-level error type for Brief operations.
#[derive(Error, Debug)]
pub enum BriefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Maximum {max} PDFs can be uploaded, got {got}.")]
    TooManyFiles { max: usize, got: usize },

    #[error("Invalid file type: {0} is not a PDF")]
    NotPdf(String),

    #[error("Error extracting text from PDF: {0}")]
    PdfExtraction(String),

    #[error("No PDF text context available. Upload PDFs first.")]
    NoContext,

    #[error("Invalid YouTube URL: {0}")]
    InvalidVideoUrl(String),

    #[error("YouTube API error: {0}")]
    YouTube(String),

    #[error("Upstream provider unavailable: {0}")]
    Upstream(String),

    #[error("Failed to store feedback: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BriefError {
    /// Whether the caller is at fault. Client errors are never retried.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BriefError::InvalidInput(_)
                | BriefError::TooManyFiles { .. }
                | BriefError::NotPdf(_)
                | BriefError::PdfExtraction(_)
                | BriefError::NoContext
                | BriefError::InvalidVideoUrl(_)
        )
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

/// Result type alias for Brief operations.
pub type Result<T> = std::result::Result<T, BriefError>;
