//! Document ingestion: declared kinds, uploaded payloads, and text extraction.

mod document;
pub mod pdf;

pub use document::{Document, DocumentKind, ExtractedText};
pub use pdf::extract_pdf_text;

use thiserror::Error;

/// Faults raised while turning an uploaded document into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The PDF parser could not open the stream at all.
    #[error("Failed to parse PDF: {0}")]
    Pdf(#[from] lopdf::Error),
    /// A plain-text upload was not valid UTF-8.
    #[error("Text upload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The declared MIME type (or file extension) is not one we can extract.
    #[error("Unsupported document type: {0}")]
    UnsupportedKind(String),
}
