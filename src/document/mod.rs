//! Text extraction from uploaded documents.
//!
//! A batch of uploads is validated as a whole before any file is parsed:
//! one bad name or one parse failure rejects every file in the batch.

mod pdf;

pub use pdf::PdfExtractor;

use crate::error::{BriefError, Result};
use tracing::{debug, info, instrument};

/// Default maximum number of files in one upload batch.
pub const MAX_UPLOAD_FILES: usize = 5;

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the name carries a `.pdf` suffix, ignoring case.
    pub fn has_pdf_name(&self) -> bool {
        self.file_name.to_lowercase().ends_with(".pdf")
    }
}

/// Trait for pulling plain text out of a document blob.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of every page, concatenated in page order.
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extract and concatenate text from a batch of uploaded PDFs.
///
/// Files are joined in input order with no delimiter. The batch fails as a
/// whole if it holds more than `max_files` files, if any name lacks a `.pdf`
/// suffix, or if any file fails to parse.
#[instrument(skip(extractor, files), fields(count = files.len()))]
pub fn extract_batch(
    extractor: &dyn TextExtractor,
    files: &[UploadedFile],
    max_files: usize,
) -> Result<String> {
    if files.len() > max_files {
        return Err(BriefError::TooManyFiles {
            max: max_files,
            got: files.len(),
        });
    }

    if let Some(bad) = files.iter().find(|f| !f.has_pdf_name()) {
        return Err(BriefError::NotPdf(bad.file_name.clone()));
    }

    let mut combined = String::new();
    for file in files {
        let text = extractor.extract(&file.bytes)?;
        debug!("Extracted {} characters from {}", text.chars().count(), file.file_name);
        combined.push_str(&text);
    }

    info!("Extracted {} characters from {} files", combined.chars().count(), files.len());
    Ok(combined)
}
