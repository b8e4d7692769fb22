//! Document-to-text extraction for uploaded résumé files.
//!
//! Extraction never fails past this boundary: a file that cannot be read
//! degrades to empty text, which scores zero downstream. Supported formats
//! are PDF, DOCX, and plain text, keyed off the uploaded file name.

use std::io::{Cursor, Read};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use zip::ZipArchive;

/// Pluggable extractor carried in `AppState` as `Arc<dyn TextExtractor>`,
/// so tests and alternative backends can swap it without touching handlers.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns extracted plain text, or an empty string when the file
    /// cannot be read.
    async fn extract(&self, file_name: &str, data: &[u8]) -> String;
}

/// Default extractor over in-memory upload bytes.
pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, file_name: &str, data: &[u8]) -> String {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => extract_pdf(file_name, data),
            "docx" => extract_docx(file_name, data),
            "txt" => String::from_utf8_lossy(data).into_owned(),
            other => {
                warn!(file = file_name, extension = other, "unsupported resume file type");
                String::new()
            }
        }
    }
}

/// pdf-extract panics on some malformed files, so the call is fenced the
/// same way scoring fences a single bad résumé.
fn extract_pdf(file_name: &str, data: &[u8]) -> String {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(data))) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(file = file_name, error = %e, "pdf text extraction failed");
            String::new()
        }
        Err(_) => {
            warn!(file = file_name, "pdf text extraction panicked");
            String::new()
        }
    }
}

fn extract_docx(file_name: &str, data: &[u8]) -> String {
    match read_docx_text(data) {
        Ok(text) => text,
        Err(e) => {
            warn!(file = file_name, error = %e, "docx text extraction failed");
            String::new()
        }
    }
}

/// A DOCX file is a ZIP archive; the document body lives in
/// `word/document.xml` as `<w:t>` text runs inside `<w:p>` paragraphs.
fn read_docx_text(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut content = String::new();
    let mut in_text_run = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(ref e) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Event::End(ref e) if e.name().as_ref() == b"w:p" => content.push('\n'),
            Event::Text(e) if in_text_run => {
                content.push_str(&e.xml_content()?);
                content.push(' ');
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_txt_passthrough() {
        let text = FileTextExtractor
            .extract("resume.txt", "plain text resume".as_bytes())
            .await;
        assert_eq!(text, "plain text resume");
    }

    #[tokio::test]
    async fn test_txt_invalid_utf8_is_lossy_not_fatal() {
        let text = FileTextExtractor
            .extract("resume.txt", &[0x72, 0xff, 0x73])
            .await;
        assert!(text.contains('r'));
        assert!(text.contains('s'));
    }

    #[tokio::test]
    async fn test_unknown_extension_yields_empty_text() {
        let text = FileTextExtractor.extract("resume.png", &[1, 2, 3]).await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_missing_extension_yields_empty_text() {
        let text = FileTextExtractor.extract("resume", b"anything").await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_yields_empty_text() {
        let text = FileTextExtractor
            .extract("resume.pdf", b"not actually a pdf")
            .await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_corrupt_docx_yields_empty_text() {
        let text = FileTextExtractor
            .extract("resume.docx", b"not actually a zip")
            .await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_docx_text_runs_extracted() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Skills: Python, SQL</w:t></w:r></w:p>
                <w:p><w:r><w:t>4 years of experience</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let text = FileTextExtractor
            .extract("resume.docx", &docx_bytes(xml))
            .await;
        assert!(text.contains("Skills: Python, SQL"));
        assert!(text.contains("4 years of experience"));
    }

    #[tokio::test]
    async fn test_extension_matching_is_case_insensitive() {
        let text = FileTextExtractor
            .extract("RESUME.TXT", b"upper case name")
            .await;
        assert_eq!(text, "upper case name");
    }
}
