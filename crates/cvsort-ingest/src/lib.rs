use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod docx;
pub mod input;
pub mod text;

pub use cvsort_core::{BackendError, DocumentBackend, FileKind, TextExtractor, Upload};
pub use docx::DocxBackend;
pub use input::{collect_inputs, display_name, is_supported, read_uploads};
pub use text::{PlainTextBackend, decode_utf8_ignoring_invalid};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Stands in for a backend that was compiled out.
struct UnsupportedBackend(FileKind);

impl DocumentBackend for UnsupportedBackend {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, BackendError> {
        Err(BackendError::Unsupported(self.0))
    }
}

#[cfg(feature = "pdf")]
fn default_pdf_backend() -> Box<dyn DocumentBackend> {
    Box::new(cvsort_pdf_mupdf::MupdfBackend::new())
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_backend() -> Box<dyn DocumentBackend> {
    Box::new(UnsupportedBackend(FileKind::Pdf))
}

/// Text extraction for every supported [`FileKind`].
///
/// Dispatches to the matching backend and swallows backend errors: a file
/// that cannot be parsed is logged and contributes empty text.
pub struct DocumentExtractor {
    pdf: Box<dyn DocumentBackend>,
    docx: Box<dyn DocumentBackend>,
    text: Box<dyn DocumentBackend>,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self {
            pdf: default_pdf_backend(),
            docx: Box::new(DocxBackend),
            text: Box::new(PlainTextBackend),
        }
    }
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the PDF backend (e.g. with a mock in tests).
    pub fn with_pdf_backend(mut self, backend: Box<dyn DocumentBackend>) -> Self {
        self.pdf = backend;
        self
    }

    /// Extractor without PDF support; PDFs come back empty.
    pub fn without_pdf() -> Self {
        Self::default().with_pdf_backend(Box::new(UnsupportedBackend(FileKind::Pdf)))
    }

    /// Fallible extraction, for callers that want the error.
    pub fn try_extract(&self, bytes: &[u8], kind: FileKind) -> Result<String, BackendError> {
        match kind {
            FileKind::Pdf => self.pdf.extract_text(bytes),
            FileKind::Docx => self.docx.extract_text(bytes),
            FileKind::Text => self.text.extract_text(bytes),
        }
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, bytes: &[u8], kind: FileKind) -> String {
        match self.try_extract(bytes, kind) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), error = %e, "text extraction failed, using empty text");
                String::new()
            }
        }
    }
}
