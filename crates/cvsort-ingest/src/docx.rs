//! DOCX text extraction.
//!
//! A `.docx` file is a ZIP package; the body lives in `word/document.xml`.
//! Paragraph text is read SAX-style, keeping one line per non-empty `<w:p>`.

use std::io::{BufReader, Cursor};

use quick_xml::Reader;
use quick_xml::events::Event;

use cvsort_core::{BackendError, DocumentBackend};

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Default)]
pub struct DocxBackend;

impl DocumentBackend for DocxBackend {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| BackendError::OpenError(format!("not a DOCX package: {}", e)))?;
        let part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| BackendError::OpenError(format!("{}: {}", DOCUMENT_PART, e)))?;

        let paragraphs = read_paragraphs(BufReader::new(part))?;
        Ok(paragraphs.join("\n"))
    }
}

/// Collect the text of every non-empty paragraph, in document order.
///
/// `<w:t>` runs are concatenated, `<w:tab/>` becomes a tab and
/// `<w:br/>`/`<w:cr/>` a newline.
fn read_paragraphs<R: std::io::BufRead>(reader: R) -> Result<Vec<String>, BackendError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text_run {
                    let text = e
                        .unescape()
                        .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_text_run {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(BackendError::ExtractionError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Build an in-memory DOCX package whose body holds `body_xml`.
    pub(crate) fn docx_bytes(body_xml: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body_xml
        );
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zw = zip::ZipWriter::new(&mut cursor);
            let opts = zip::write::SimpleFileOptions::default();
            zw.start_file("[Content_Types].xml", opts).unwrap();
            zw.write_all(b"<Types/>").unwrap();
            zw.start_file(DOCUMENT_PART, opts).unwrap();
            zw.write_all(document.as_bytes()).unwrap();
            zw.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn paragraphs_joined_by_newline() {
        let bytes = docx_bytes(
            "<w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space=\"preserve\"> Smith</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t>Data Engineer</w:t></w:r></w:p>",
        );
        let text = DocxBackend.extract_text(&bytes).unwrap();
        assert_eq!(text, "Jane Smith\nData Engineer");
    }

    #[test]
    fn tabs_breaks_and_entities() {
        let bytes = docx_bytes(
            "<w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>Lead</w:t><w:br/><w:t>2020</w:t></w:r></w:p>",
        );
        let text = DocxBackend.extract_text(&bytes).unwrap();
        assert_eq!(text, "R&D\tLead\n2020");
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        let bytes = docx_bytes("<w:p><w:r><w:t></w:t></w:r></w:p><w:p><w:pPr/></w:p>");
        assert_eq!(DocxBackend.extract_text(&bytes).unwrap(), "");
    }

    #[test]
    fn non_zip_is_open_error() {
        let err = DocxBackend.extract_text(b"plain text").unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }

    #[test]
    fn zip_without_document_part() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zw = zip::ZipWriter::new(&mut cursor);
            zw.start_file("readme.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            zw.write_all(b"hi").unwrap();
            zw.finish().unwrap();
        }
        let err = DocxBackend.extract_text(&cursor.into_inner()).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }
}
