use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("{0} support not compiled in")]
    Unsupported(FileKind),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document format, decided by filename extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
}

impl FileKind {
    /// `.pdf` and `.docx` (any case) map to their kinds; everything else is text.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            FileKind::Pdf
        } else if lower.ends_with(".docx") {
            FileKind::Docx
        } else {
            FileKind::Text
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Text => "txt",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Pdf => f.write_str("PDF"),
            FileKind::Docx => f.write_str("DOCX"),
            FileKind::Text => f.write_str("plain text"),
        }
    }
}

/// Trait for format-specific text extraction backends.
///
/// Backends may fail; the [`TextExtractor`] wrapping them is responsible for
/// turning failures into empty text.
pub trait DocumentBackend: Send + Sync {
    /// Extract the full text content of a document held in memory.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError>;
}

/// Best-effort text extraction as seen by the batch pipeline.
///
/// Implementations must not fail: a document that cannot be parsed yields `""`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], kind: FileKind) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension() {
        assert_eq!(FileKind::from_filename("cv.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("CV.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("cv.Docx"), FileKind::Docx);
        assert_eq!(FileKind::from_filename("cv.txt"), FileKind::Text);
        assert_eq!(FileKind::from_filename("cv.doc"), FileKind::Text);
        assert_eq!(FileKind::from_filename("pdf"), FileKind::Text);
        assert_eq!(FileKind::from_filename("report.pdf.txt"), FileKind::Text);
    }

    #[test]
    fn unsupported_error_message() {
        let e = BackendError::Unsupported(FileKind::Pdf);
        assert_eq!(e.to_string(), "PDF support not compiled in");
    }
}
