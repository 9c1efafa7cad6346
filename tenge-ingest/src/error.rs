use std::path::PathBuf;

use thiserror::Error;

/// Document-level failures. Everything finer grained (a bad line, a missing
/// header label) is absorbed by the extractors and never surfaces here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported statement format: {path} (expected .pdf or .txt)")]
    UnsupportedFormat { path: PathBuf },
    #[error("Could not read statement {path}: {reason}")]
    ExtractionFailure {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl IngestError {
    pub fn extraction(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        IngestError::ExtractionFailure {
            path: path.into(),
            reason: reason.into(),
            source: Some(source.into()),
        }
    }
}
