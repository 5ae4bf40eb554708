use std::sync::Arc;
use std::time::Instant;

use crate::error::AppResult;
use crate::models::ExtractedRecord;
use crate::services::analyzer::{AnalysisSettings, DocumentAnalyzer};
use crate::services::docx_extractor::DocxExtractor;
use crate::services::format_router::{ensure_min_content, route_document, DocumentRoute};
use crate::services::llm_client::ChatModel;
use crate::services::normalizer::normalize;
use crate::services::pdf_processor::PdfProcessor;
use crate::services::text_decoder::decode_text;

pub const LEGACY_PDF_FILENAME: &str = "documento.pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Route, extract, analyse and normalize one uploaded document.
pub struct DocumentPipeline {
    analyzer: DocumentAnalyzer,
}

impl DocumentPipeline {
    pub fn new(model: Arc<dyn ChatModel>, settings: AnalysisSettings) -> Self {
        Self {
            analyzer: DocumentAnalyzer::new(model, settings),
        }
    }

    pub fn model_name(&self) -> &str {
        self.analyzer.model_name()
    }

    pub async fn process_document(
        &self,
        bytes: &[u8],
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> AppResult<ExtractedRecord> {
        let start = Instant::now();
        let route = route_document(bytes, filename, content_type)?;

        tracing::info!(
            route = route.label(),
            file_name = ?filename,
            file_size = bytes.len(),
            "Processing document"
        );

        let record = match route {
            DocumentRoute::Image => {
                let raw = self.analyzer.analyze_image(bytes, content_type).await?;
                normalize(&raw).with_image_source()
            }
            DocumentRoute::Pdf => {
                self.analyze_text(route, PdfProcessor::extract_text(bytes)?).await?
            }
            DocumentRoute::Docx => {
                self.analyze_text(route, DocxExtractor::extract_text(bytes)?).await?
            }
            DocumentRoute::Text => self.analyze_text(route, decode_text(bytes)?).await?,
        };

        tracing::info!(
            route = route.label(),
            char_count = record.char_count,
            ages = record.ages.len(),
            carrier = ?record.carrier,
            processing_time_ms = start.elapsed().as_millis() as u64,
            "Document processed"
        );

        Ok(record)
    }

    /// Entry point for callers that only ever send PDFs.
    pub async fn process_pdf(&self, bytes: &[u8]) -> AppResult<ExtractedRecord> {
        self.process_document(bytes, Some(LEGACY_PDF_FILENAME), Some(PDF_CONTENT_TYPE))
            .await
    }

    async fn analyze_text(&self, route: DocumentRoute, text: String) -> AppResult<ExtractedRecord> {
        ensure_min_content(route, &text)?;

        let raw = self.analyzer.analyze_text(&text).await?;
        Ok(normalize(&raw).with_source_text(&text))
    }
}
