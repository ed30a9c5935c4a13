use mupdf::{Document, TextPageFlags};

use cvsort_core::{BackendError, DocumentBackend};

/// MuPDF-based implementation of [`DocumentBackend`] for PDF files.
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// that DOCX and plain-text code paths do not transitively depend on it.
///
/// Every text block is kept, including the top band of the first page where
/// resumes usually print the candidate's name.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for MupdfBackend {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        // The header may legally be preceded by junk within the first 1 KiB.
        let head = &bytes[..bytes.len().min(1024)];
        if !head.windows(5).any(|w| w == b"%PDF-") {
            return Err(BackendError::OpenError("missing %PDF- header".into()));
        }

        let document = Document::from_bytes(bytes, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        Ok(pages_text.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        let backend = MupdfBackend::new();
        let err = backend.extract_text(b"hello world").unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }

    #[test]
    fn header_must_appear_in_first_kib() {
        let mut bytes = vec![b' '; 2048];
        bytes.extend_from_slice(b"%PDF-1.7\n");
        let err = MupdfBackend::new().extract_text(&bytes).unwrap_err();
        assert_eq!(err.to_string(), "failed to open document: missing %PDF- header");
    }
}
