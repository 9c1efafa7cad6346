//! Input format and bank profile detection.

use std::path::Path;

use crate::parsers::Profile;

/// Document container, decided by file extension alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
}

impl DocumentFormat {
    /// `None` for anything other than `.pdf` / `.txt` (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "txt" => Some(DocumentFormat::Text),
            _ => None,
        }
    }
}

/// True when `filename` ends in `.pdf` or `.txt`.
pub fn is_supported_format(filename: impl AsRef<Path>) -> bool {
    DocumentFormat::from_path(filename).is_some()
}

/// Pick the extraction profile for a text body. Any signature match selects
/// Kaspi; everything else is generic.
pub fn detect_profile<S: AsRef<str>>(content: &str, kaspi_signatures: &[S]) -> Profile {
    let is_kaspi = kaspi_signatures
        .iter()
        .map(AsRef::as_ref)
        .any(|sig| !sig.is_empty() && content.contains(sig));
    if is_kaspi { Profile::Kaspi } else { Profile::Generic }
}
