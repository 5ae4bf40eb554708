use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};
use crate::services::format_router::image_mime_type;
use crate::services::llm_client::{ChatModel, CompletionRequest, UserContent};
use crate::services::prompts;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub model: String,
    pub temperature: f32,
}

impl From<&LlmConfig> for AnalysisSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

/// Sends document text or images to the model and returns its raw JSON reply.
pub struct DocumentAnalyzer {
    model: Arc<dyn ChatModel>,
    settings: AnalysisSettings,
}

impl DocumentAnalyzer {
    pub fn new(model: Arc<dyn ChatModel>, settings: AnalysisSettings) -> Self {
        Self { model, settings }
    }

    pub fn model_name(&self) -> &str {
        &self.settings.model
    }

    pub async fn analyze_text(&self, document_text: &str) -> AppResult<Value> {
        let request = self.request(
            prompts::TEXT_SYSTEM_PROMPT,
            UserContent::Text(prompts::text_prompt(document_text)),
        );
        self.invoke(request).await
    }

    pub async fn analyze_image(&self, image: &[u8], content_type: Option<&str>) -> AppResult<Value> {
        let mime_type = image_mime_type(image, content_type);
        let image_data_uri = format!("data:{};base64,{}", mime_type, STANDARD.encode(image));

        tracing::debug!(mime_type = %mime_type, image_bytes = image.len(), "Analysing image");

        let request = self.request(
            prompts::IMAGE_SYSTEM_PROMPT,
            UserContent::TextWithImage {
                text: prompts::IMAGE_PROMPT.to_string(),
                image_data_uri,
            },
        );
        self.invoke(request).await
    }

    fn request(&self, system_prompt: &str, user: UserContent) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            system_prompt: system_prompt.to_string(),
            user,
            temperature: self.settings.temperature,
            json_output: true,
        }
    }

    async fn invoke(&self, request: CompletionRequest) -> AppResult<Value> {
        let reply = self.model.complete(request).await?;
        parse_reply(&reply.content)
    }
}

pub fn parse_reply(content: &str) -> AppResult<Value> {
    serde_json::from_str(content).map_err(|e| {
        let preview: String = content.chars().take(100).collect();
        tracing::error!(
            response_len = content.len(),
            response_preview = %preview,
            error = %e,
            "Failed to parse model reply"
        );
        AppError::model_response_parse(e.to_string())
    })
}
