use std::time::Instant;
use lopdf::Document;

use crate::error::{AppError, AppResult};

pub struct PdfProcessor;

impl PdfProcessor {
    /// Text of every page in order, non-empty pages separated by a blank line.
    pub fn extract_text(pdf_content: &[u8]) -> AppResult<String> {
        let start = Instant::now();

        tracing::info!("Starting PDF text extraction ({} bytes)", pdf_content.len());

        let doc = Document::load_mem(pdf_content).map_err(|e| {
            tracing::warn!("PDF structure could not be parsed: {}", e);
            AppError::extraction("PDF", e.to_string())
        })?;

        let pages = doc.get_pages();
        let mut page_texts = Vec::with_capacity(pages.len());

        for page_number in pages.keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) if !text.trim().is_empty() => page_texts.push(text),
                Ok(_) => tracing::debug!(page = page_number, "Page has no text"),
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "Page text extraction failed")
                }
            }
        }

        let text = if page_texts.is_empty() {
            Self::extract_whole_document(pdf_content)
        } else {
            page_texts.join("\n\n")
        };

        tracing::info!(
            "PDF processing completed in {}ms, {} pages, extracted {} characters",
            start.elapsed().as_millis(),
            pages.len(),
            text.chars().count()
        );

        Ok(text)
    }

    // pdf-extract decodes font encodings that lopdf's page extraction skips.
    fn extract_whole_document(pdf_content: &[u8]) -> String {
        tracing::info!("No text from page extraction, retrying with pdf-extract");

        match pdf_extract::extract_text_from_mem(pdf_content) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!("pdf-extract failed: {}", e);
                String::new()
            }
        }
    }
}
