use cvsort_core::{BackendError, DocumentBackend};

/// Plain-text "backend": UTF-8 decoding that drops invalid byte sequences
/// instead of failing or inserting replacement characters.
#[derive(Debug, Default)]
pub struct PlainTextBackend;

impl DocumentBackend for PlainTextBackend {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        Ok(decode_utf8_ignoring_invalid(bytes))
    }
}

/// Decode UTF-8, skipping invalid sequences and a leading byte-order mark.
pub fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
