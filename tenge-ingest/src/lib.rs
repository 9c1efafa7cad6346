//! tenge-ingest: statement text extraction (PDF/TXT) and bank-specific parsers.

pub mod amount;
pub mod classifier;
pub mod config;
pub mod date;
pub mod detect;
pub mod error;
pub mod parsers;
pub mod pdf;
pub mod service;

pub use amount::parse_amount;
pub use classifier::{ClassifierProfile, LineClassifier};
pub use config::ParserConfig;
pub use date::DateParser;
pub use detect::{DocumentFormat, detect_profile, is_supported_format};
pub use error::IngestError;
pub use parsers::{GenericExtractor, KaspiExtractor, Profile, StatementExtractor};
pub use pdf::{PdfTextExtractor, TextExtractor};
pub use service::StatementParsingService;
