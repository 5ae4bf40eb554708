use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{AppError, AppResult};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxExtractor;

impl DocxExtractor {
    /// Paragraph text of the main document part, one paragraph per line.
    pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| AppError::extraction("DOCX", format!("not a zip archive: {}", e)))?;

        let xml = Self::read_part(&mut archive, DOCUMENT_PART)?;
        let paragraphs = Self::paragraphs(&xml)?;

        tracing::debug!(paragraphs = paragraphs.len(), "DOCX paragraphs extracted");
        Ok(paragraphs.join("\n"))
    }

    fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> AppResult<String> {
        let mut part = archive
            .by_name(name)
            .map_err(|e| AppError::extraction("DOCX", format!("missing {}: {}", name, e)))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| AppError::extraction("DOCX", format!("unreadable {}: {}", name, e)))?;
        Ok(xml)
    }

    fn paragraphs(xml: &str) -> AppResult<Vec<String>> {
        let mut reader = Reader::from_str(xml);

        let mut paragraphs = Vec::new();
        // Open w:p elements; text boxes can nest paragraphs.
        let mut open: Vec<String> = Vec::new();
        let mut in_text = false;
        let mut depth: usize = 0;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    match e.name().as_ref() {
                        b"w:p" => open.push(String::new()),
                        b"w:t" => in_text = true,
                        _ => {}
                    }
                }
                Ok(Event::End(e)) => {
                    depth = depth.saturating_sub(1);
                    match e.name().as_ref() {
                        b"w:p" => {
                            if let Some(paragraph) = open.pop() {
                                if !paragraph.is_empty() {
                                    paragraphs.push(paragraph);
                                }
                            }
                        }
                        b"w:t" => in_text = false,
                        _ => {}
                    }
                }
                Ok(Event::Text(e)) if in_text => {
                    let text = e.unescape().map_err(|err| {
                        AppError::extraction("DOCX", format!("malformed XML text: {}", err))
                    })?;
                    if let Some(current) = open.last_mut() {
                        current.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) if in_text => {
                    if let Some(current) = open.last_mut() {
                        current.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                // A truncated part ends with elements still open.
                Ok(Event::Eof) if depth > 0 => {
                    return Err(AppError::extraction(
                        "DOCX",
                        format!("unexpected end of XML with {} unclosed elements", depth),
                    ))
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(AppError::extraction(
                        "DOCX",
                        format!(
                            "malformed XML at position {}: {}",
                            reader.error_position(),
                            e
                        ),
                    ))
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}
