//! PDF text extraction backed by `pdf-extract`.

use super::TextExtractor;
use crate::error::{BriefError, Result};

/// PDF extractor. Pages without text contribute nothing to the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| BriefError::PdfExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{extract_batch, UploadedFile, MAX_UPLOAD_FILES};

    /// Build a minimal PDF with one Helvetica text line per page. Empty
    /// strings produce pages with an empty content stream.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            let stream = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text)
            };
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        pdf
    }

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_extracts_single_page() {
        let text = PdfExtractor::new().extract(&build_pdf(&["Hello"])).unwrap();
        assert_eq!(words(&text), vec!["Hello"]);
    }

    #[test]
    fn test_blank_page_contributes_no_text() {
        let text = PdfExtractor::new().extract(&build_pdf(&[""])).unwrap();
        assert!(text.trim().is_empty());

        let text = PdfExtractor::new().extract(&build_pdf(&["", "World"])).unwrap();
        assert_eq!(words(&text), vec!["World"]);
    }

    #[test]
    fn test_batch_of_real_pdfs_keeps_input_order() {
        let first = UploadedFile::new("first.pdf", build_pdf(&["Hello"]));
        let second = UploadedFile::new("second.PDF", build_pdf(&["", "World"]));

        let text = extract_batch(&PdfExtractor::new(), &[first.clone(), second.clone()], MAX_UPLOAD_FILES)
            .unwrap();
        assert_eq!(words(&text), vec!["Hello", "World"]);

        let text = extract_batch(&PdfExtractor::new(), &[second, first], MAX_UPLOAD_FILES).unwrap();
        assert_eq!(words(&text), vec!["World", "Hello"]);
    }

    #[test]
    fn test_real_pdf_batch_fails_on_one_bad_file() {
        let good = UploadedFile::new("good.pdf", build_pdf(&["Hello"]));
        let bad = UploadedFile::new("bad.pdf", b"not a pdf".to_vec());

        let err = extract_batch(&PdfExtractor::new(), &[good, bad], MAX_UPLOAD_FILES).unwrap_err();
        assert!(matches!(err, BriefError::PdfExtraction(_)));
    }

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let err = PdfExtractor::new().extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, BriefError::PdfExtraction(_)));
        assert!(err.is_client_error());
    }
}
