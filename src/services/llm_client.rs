use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};

/// User turn of a completion request.
#[derive(Debug, Clone, PartialEq)]
pub enum UserContent {
    Text(String),
    TextWithImage { text: String, image_data_uri: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user: UserContent,
    pub temperature: f32,
    /// Ask the provider to constrain the reply to a JSON object.
    pub json_output: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReply {
    pub content: String,
}

/// A remote chat model. Implementations must be shareable across requests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<CompletionReply>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone, Debug)]
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(config: &LlmConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    fn to_wire(request: CompletionRequest) -> ChatRequest {
        let user_content = match request.user {
            UserContent::Text(text) => MessageContent::Text(text),
            UserContent::TextWithImage { text, image_data_uri } => MessageContent::Parts(vec![
                ContentPart::Text { text },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: image_data_uri },
                },
            ]),
        };

        ChatRequest {
            model: request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: request.temperature,
            response_format: request
                .json_output
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<CompletionReply> {
        let model = request.model.clone();
        let body = Self::to_wire(request);

        tracing::debug!(model = %model, "Sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::model_invocation(format!("request timed out: {}", e))
                } else {
                    AppError::model_invocation(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, model = %model, "Chat completion rejected");
            return Err(AppError::model_invocation(format!(
                "API request failed: {} - {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::model_invocation(format!("Failed to read response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::model_invocation("No content in model response"))?;

        tracing::debug!(model = %model, reply_len = content.len(), "Chat completion received");
        Ok(CompletionReply { content })
    }
}
