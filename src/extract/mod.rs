pub mod text;
pub mod pdf;
pub mod docx;

use crate::error::Result;

pub const UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Picks the kind from the filename suffix.
    pub fn detect(filename: &str) -> Option<Self> {
        let extension = filename.rsplit_once('.')?.1;
        match extension.to_lowercase().as_str() {
            "txt" => Some(DocumentKind::PlainText),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Extracts readable text from an uploaded file.
///
/// Unknown kinds yield [`UNSUPPORTED_FILE_TYPE`] as the text rather than an error;
/// callers that forward it to the model get the sentinel as context.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String> {
    match DocumentKind::detect(filename) {
        Some(DocumentKind::PlainText) => Ok(text::decode(bytes)),
        Some(DocumentKind::Pdf) => pdf::extract(bytes),
        Some(DocumentKind::Docx) => docx::extract(bytes),
        None => {
            tracing::warn!("Unsupported file type: {}", filename);
            Ok(UNSUPPORTED_FILE_TYPE.to_string())
        }
    }
}
