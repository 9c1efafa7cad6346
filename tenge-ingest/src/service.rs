//! Document-level entry point: path in, `Statement` out.

use std::path::Path;

use tenge_core::Statement;
use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::detect::{DocumentFormat, detect_profile};
use crate::error::IngestError;
use crate::parsers::Profile;
use crate::pdf::{PdfTextExtractor, TextExtractor};

pub struct StatementParsingService {
    config: ParserConfig,
    pdf: Box<dyn TextExtractor>,
}

impl Default for StatementParsingService {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl StatementParsingService {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            pdf: Box::new(PdfTextExtractor),
        }
    }

    /// Replace the PDF-to-text collaborator.
    pub fn with_text_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.pdf = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn is_supported_format(&self, filename: impl AsRef<Path>) -> bool {
        DocumentFormat::from_path(filename).is_some()
    }

    /// Parse the statement at `path`.
    ///
    /// `.pdf` goes through the text extractor and the generic profile. `.txt`
    /// is read as-is and routed to Kaspi when a configured signature appears.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Statement, IngestError> {
        let path = path.as_ref();
        let Some(format) = DocumentFormat::from_path(path) else {
            return Err(IngestError::UnsupportedFormat { path: path.to_path_buf() });
        };
        info!(path = %path.display(), ?format, "parsing statement");

        let statement = match format {
            DocumentFormat::Pdf => {
                let text = self.pdf.extract_text(path)?;
                self.parse_text(&text, Profile::Generic)
            }
            DocumentFormat::Text => {
                let text = read_text(path)?;
                let profile = detect_profile(&text, &self.config.kaspi_signatures);
                self.parse_text(&text, profile)
            }
        };

        info!(
            path = %path.display(),
            transactions = statement.transactions.len(),
            incomes = statement.incomes().count(),
            expenses = statement.expenses().count(),
            "statement parsed"
        );
        Ok(statement)
    }

    /// Run one profile over already-extracted text.
    pub fn parse_text(&self, text: &str, profile: Profile) -> Statement {
        info!(profile = profile.name(), "selected extraction profile");
        profile.extractor(&self.config).extract(text)
    }
}

fn read_text(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)
        .map_err(|e| IngestError::extraction(path, "failed to read text file", e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(path = %path.display(), "statement is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_service_is_shareable() {
        assert_send_sync::<StatementParsingService>();
    }

    #[test]
    fn test_unsupported_extension_never_touches_disk() {
        let service = StatementParsingService::default();
        let err = service.parse("/nonexistent/statement.csv").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
        assert!(!service.is_supported_format("statement.xlsx"));
        assert!(service.is_supported_format("statement.TXT"));
    }

    #[test]
    fn test_parse_text_with_explicit_profile() {
        let service = StatementParsingService::default();
        let statement = service.parse_text("04.10.25  - 110,00 ₸  Кафе Алматы", Profile::Kaspi);
        assert_eq!(statement.transactions.len(), 1);
    }
}
