//! PDF text extraction.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::debug;

use crate::error::IngestError;

/// Turns a document on disk into plain text. The service holds one of these
/// so tests can substitute canned text for real PDFs.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, IngestError>;
}

/// `pdf-extract` backed extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, IngestError> {
        let bytes = std::fs::read(path)
            .map_err(|e| IngestError::extraction(path, "failed to read PDF file", e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "extracting PDF text");

        // pdf-extract panics on some malformed inputs instead of returning Err.
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes)));
        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(IngestError::extraction(
                path,
                "failed to extract text from PDF",
                e.to_string(),
            )),
            Err(_) => Err(IngestError::extraction(
                path,
                "PDF text extractor aborted",
                "malformed PDF structure",
            )),
        }
    }
}
