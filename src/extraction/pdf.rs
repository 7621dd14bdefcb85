//! PDF text extraction backed by `lopdf`.
//!
//! Pages are visited in document order and their text is joined with a newline after each page.
//! Pages without text contribute nothing. A document whose pages are all empty yields `None`.

use super::ExtractionError;
use lopdf::Document as PdfDocument;

/// Extract the concatenated text of every page in a PDF held in memory.
///
/// Returns `Ok(None)` when the document parsed but no page produced readable text (for example
/// scanned, image-only PDFs). Fails only when the parser cannot open the stream at all.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<Option<String>, ExtractionError> {
    let document = PdfDocument::load_mem(bytes)?;
    let pages = document.get_pages();
    let mut text = String::new();
    let mut pages_with_text = 0usize;

    for (&page_number, _) in &pages {
        let page_text = match document.extract_text(&[page_number]) {
            Ok(page_text) => page_text,
            Err(error) => {
                tracing::warn!(page = page_number, error = %error, "Skipping unreadable PDF page");
                continue;
            }
        };
        let page_text = page_text.trim_end();
        if page_text.trim().is_empty() {
            continue;
        }
        text.push_str(page_text);
        text.push('\n');
        pages_with_text += 1;
    }

    tracing::debug!(
        pages = pages.len(),
        pages_with_text,
        chars = text.chars().count(),
        "Extracted PDF text"
    );

    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

#[cfg(test)]
#[path = "../../tests/common/pdf.rs"]
pub(crate) mod test_support;
