pub mod analyzer;
pub mod docx_extractor;
pub mod format_router;
pub mod llm_client;
pub mod normalizer;
pub mod pdf_processor;
pub mod pipeline;
pub mod prompts;
pub mod text_decoder;

pub use analyzer::{AnalysisSettings, DocumentAnalyzer};
pub use docx_extractor::DocxExtractor;
pub use format_router::DocumentRoute;
pub use llm_client::{ChatModel, CompletionReply, CompletionRequest, OpenAiChatClient, UserContent};
pub use pdf_processor::PdfProcessor;
pub use pipeline::DocumentPipeline;
