//! Text extraction from various file formats
//!
//! Byte-level extraction routines plus path-based extractor types for the
//! CLI. The byte-level entry point used by the analysis engine is
//! [`extract_text`], a total function: a corrupt upload degrades to an
//! empty string instead of failing the pipeline.

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use log::warn;
use pulldown_cmark::{Event as MarkdownEvent, Parser as MarkdownParser};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader as XmlReader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

/// Extract and normalize text from an uploaded document.
///
/// Never fails the caller: extraction errors are logged and collapse to
/// an empty string, which downstream stages treat as "document type
/// unknown, all sections missing".
pub fn extract_text(bytes: &[u8], file_type: FileType) -> String {
    let extracted = match file_type {
        FileType::Pdf => extract_pdf_bytes(bytes),
        FileType::Docx => extract_docx_bytes(bytes),
        FileType::Markdown => Ok(flatten_markdown(&decode_lossy(bytes))),
        FileType::Text | FileType::Unknown => Ok(decode_lossy(bytes)),
    };

    match extracted {
        Ok(text) => normalize_text(&text),
        Err(e) => {
            warn!("Text extraction failed, treating document as empty: {}", e);
            String::new()
        }
    }
}

/// Extract text from a PDF, page by page, joined with single newlines.
/// Scanned-image PDFs with no text layer yield an empty string.
pub fn extract_pdf_bytes(bytes: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ResumeAnalyzerError::PdfExtraction(format!("Failed to extract PDF text: {}", e)))?;

    if pages.is_empty() {
        return Ok(String::new());
    }

    let text = pages.join("\n");
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(text)
}

/// Extract text from a DOCX container: paragraphs in document order, one
/// line per paragraph. Table cell paragraphs appear where the document
/// places them, which is row-major order.
pub fn extract_docx_bytes(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("Not a DOCX container: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| {
            ResumeAnalyzerError::DocxExtraction(format!("Missing word/document.xml: {}", e))
        })?
        .read_to_string(&mut document_xml)
        .map_err(|e| {
            ResumeAnalyzerError::DocxExtraction(format!("Unreadable word/document.xml: {}", e))
        })?;

    let mut reader = XmlReader::from_str(&document_xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(e)) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Ok(XmlEvent::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(XmlEvent::Text(t)) if in_run_text => {
                let run = t.unescape().map_err(|e| {
                    ResumeAnalyzerError::DocxExtraction(format!("Bad text run: {}", e))
                })?;
                text.push_str(&run);
            }
            Ok(XmlEvent::Empty(e)) if e.name().as_ref() == b"w:tab" => text.push(' '),
            Ok(XmlEvent::Eof) => break,
            Err(e) => {
                return Err(ResumeAnalyzerError::DocxExtraction(format!(
                    "Malformed document.xml: {}",
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(text)
}

/// Flatten markdown to plain text, keeping line structure so section
/// headers survive as their own lines.
pub fn flatten_markdown(markdown: &str) -> String {
    let mut text = String::new();

    for event in MarkdownParser::new(markdown) {
        match event {
            MarkdownEvent::Text(t) | MarkdownEvent::Code(t) => text.push_str(&t),
            MarkdownEvent::SoftBreak => text.push(' '),
            MarkdownEvent::HardBreak => text.push('\n'),
            MarkdownEvent::End(_) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text
}

fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Normalize extracted text: unify line endings, collapse runs of spaces
/// and tabs within each line, trim line edges, and cap blank runs at one
/// empty line. Case is preserved for proper-noun heuristics.
pub fn normalize_text(text: &str) -> String {
    let mut lines = Vec::new();
    let mut blank_run = 0usize;

    for raw_line in text.replace("\r\n", "\n").replace('\r', "\n").lines() {
        let collapsed = raw_line
            .split([' ', '\t'])
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if collapsed.is_empty() {
            blank_run += 1;
            if blank_run == 1 && !lines.is_empty() {
                lines.push(String::new());
            }
        } else {
            blank_run = 0;
            lines.push(collapsed);
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        extract_pdf_bytes(&bytes)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        extract_docx_bytes(&bytes)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(flatten_markdown(&markdown_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a minimal but valid DOCX in memory: a zip holding
    /// word/document.xml with two paragraphs and one table cell.
    fn make_test_docx() -> Vec<u8> {
        let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Smith</w:t></w:r></w:p>
    <w:p><w:r><w:t>Data Analyst at Acme Corp</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc>
      <w:p><w:r><w:t>Skills: SQL, Python</w:t></w:r></w:p>
    </w:tc></w:tr></w:tbl>
  </w:body>
</w:document>"#;

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_docx_extraction_keeps_paragraph_order() {
        let bytes = make_test_docx();
        let text = extract_docx_bytes(&bytes).unwrap();

        let jane = text.find("Jane Smith").unwrap();
        let role = text.find("Data Analyst at Acme Corp").unwrap();
        let skills = text.find("Skills: SQL, Python").unwrap();
        assert!(jane < role && role < skills);
    }

    #[test]
    fn test_docx_garbage_is_an_error() {
        assert!(extract_docx_bytes(b"not a zip archive").is_err());
    }

    #[test]
    fn test_extract_text_fails_closed() {
        // A corrupt PDF must degrade to an empty string, not an error.
        let text = extract_text(b"garbage bytes", FileType::Pdf);
        assert_eq!(text, "");
    }

    #[test]
    fn test_empty_input_yields_empty_text() {
        assert_eq!(extract_text(b"", FileType::Pdf), "");
        assert_eq!(extract_text(b"", FileType::Docx), "");
        assert_eq!(extract_text(b"", FileType::Text), "");
    }

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text("Jane Smith\nSkills: SQL".as_bytes(), FileType::Text);
        assert!(text.contains("Jane Smith"));
        assert!(text.contains("Skills: SQL"));
    }

    #[test]
    fn test_markdown_is_flattened() {
        let md = "# Jane Smith\n\n**Skills**\n\n- SQL\n- Python\n";
        let text = extract_text(md.as_bytes(), FileType::Markdown);
        assert!(text.contains("Jane Smith"));
        assert!(text.contains("SQL"));
        assert!(!text.contains('#'));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_normalization_collapses_whitespace() {
        let text = normalize_text("Jane\t\tSmith   \r\n\n\n\nAnalyst  ");
        assert_eq!(text, "Jane Smith\n\nAnalyst");
    }
}
