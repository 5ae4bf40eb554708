use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not extract text from {format} document: {message}")]
    Extraction { format: &'static str, message: String },

    #[error("Unsupported format. Use PDF, image (PNG/JPG/JPEG/WEBP/BMP/TIFF), DOCX or text (TXT/CSV/JSON/XML/HTML/MD)")]
    UnsupportedFormat,

    #[error("{format} document is empty or has too little content for analysis ({chars} characters, minimum {minimum})")]
    InsufficientContent { format: &'static str, chars: usize, minimum: usize },

    #[error("Model invocation failed: {message}")]
    ModelInvocation { message: String },

    #[error("Model reply is not valid JSON: {message}")]
    ModelResponseParse { message: String },

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("File too large: {size}MB exceeds limit of {limit}MB")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Invalid file: {message}")]
    InvalidFile { message: String },

    #[error("Rate limit exceeded: maximum concurrent requests reached")]
    RateLimitExceeded,

    #[error("Request timeout")]
    Timeout,

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Missing or invalid content type")]
    InvalidContentType,

    #[error("Missing file in request")]
    MissingFile,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Extraction { .. } => "EXTRACTION_ERROR",
            AppError::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            AppError::InsufficientContent { .. } => "INSUFFICIENT_CONTENT",
            AppError::ModelInvocation { .. } => "MODEL_INVOCATION_ERROR",
            AppError::ModelResponseParse { .. } => "MODEL_RESPONSE_PARSE_ERROR",
            AppError::InvalidApiKey => "INVALID_API_KEY",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::InvalidFile { .. } => "INVALID_FILE",
            AppError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AppError::Timeout => "REQUEST_TIMEOUT",
            AppError::Internal { .. } => "INTERNAL_ERROR",
            AppError::InvalidContentType => "INVALID_CONTENT_TYPE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Extraction { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFormat => StatusCode::BAD_REQUEST,
            AppError::InsufficientContent { .. } => StatusCode::BAD_REQUEST,
            AppError::ModelInvocation { .. } => StatusCode::BAD_GATEWAY,
            AppError::ModelResponseParse { .. } => StatusCode::BAD_GATEWAY,
            AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidFile { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidContentType => StatusCode::BAD_REQUEST,
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let request_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().to_rfc3339();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %message,
            "API error occurred"
        );

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
                "request_id": request_id,
                "timestamp": timestamp
            },
            "data": null
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout
    }
}

impl AppError {
    pub fn extraction(format: &'static str, message: impl Into<String>) -> Self {
        AppError::Extraction {
            format,
            message: message.into(),
        }
    }

    pub fn model_invocation(message: impl Into<String>) -> Self {
        AppError::ModelInvocation {
            message: message.into(),
        }
    }

    pub fn model_response_parse(message: impl Into<String>) -> Self {
        AppError::ModelResponseParse {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    /// True for failures caused by the remote model rather than the upload.
    pub fn is_provider_fault(&self) -> bool {
        matches!(
            self,
            AppError::ModelInvocation { .. } | AppError::ModelResponseParse { .. }
        )
    }
}
