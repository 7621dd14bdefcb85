use super::{ExtractionError, pdf::extract_pdf_text};

/// Declared kind of an uploaded document; extraction dispatches on this once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `text/plain`, decoded directly as UTF-8.
    PlainText,
    /// `application/pdf`, routed through the PDF extractor.
    Pdf,
}

impl DocumentKind {
    /// Resolve a declared MIME type, ignoring parameters such as `charset`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("text/plain") {
            Some(Self::PlainText)
        } else if essence.eq_ignore_ascii_case("application/pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }

    /// Resolve a kind from the upload's file extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Canonical MIME type for this kind.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Pdf => "application/pdf",
        }
    }
}

/// Text recovered from a document, or the sentinel for "nothing extracted".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    /// Extracted content, possibly an empty string for an empty text upload.
    Text(String),
    /// The document parsed but yielded no readable text.
    Empty,
}

impl ExtractedText {
    /// Borrow the text when present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Empty => None,
        }
    }
}

/// An uploaded document: raw bytes plus the declared kind. Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    kind: DocumentKind,
    bytes: Vec<u8>,
    file_name: Option<String>,
}

impl Document {
    /// Wrap raw bytes of a known kind.
    pub fn new(kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            bytes,
            file_name: None,
        }
    }

    /// Build a document from upload metadata.
    ///
    /// The declared MIME type wins; the file extension is consulted only when the client sent no
    /// usable type (for example `application/octet-stream`).
    pub fn from_upload(
        content_type: Option<&str>,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, ExtractionError> {
        let kind = content_type
            .and_then(DocumentKind::from_mime)
            .or_else(|| file_name.and_then(DocumentKind::from_file_name))
            .ok_or_else(|| {
                ExtractionError::UnsupportedKind(
                    content_type
                        .or(file_name)
                        .unwrap_or("unknown")
                        .to_string(),
                )
            })?;

        Ok(Self {
            kind,
            bytes,
            file_name: file_name.map(str::to_string),
        })
    }

    /// Declared kind of the document.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Raw uploaded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Client-supplied file name, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Extract text according to the declared kind.
    pub fn extract(&self) -> Result<ExtractedText, ExtractionError> {
        let extracted = match self.kind {
            DocumentKind::PlainText => {
                ExtractedText::Text(String::from_utf8(self.bytes.clone())?)
            }
            DocumentKind::Pdf => match extract_pdf_text(&self.bytes)? {
                Some(text) => ExtractedText::Text(text),
                None => ExtractedText::Empty,
            },
        };
        tracing::debug!(
            kind = self.kind.mime(),
            bytes = self.bytes.len(),
            chars = extracted.as_text().map(|text| text.chars().count()),
            "Extracted document text"
        );
        Ok(extracted)
    }
}
