use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, debug, error};

use crate::error::{AppError, AppResult};
use crate::models::{ExtractResponse, ExtractedRecord, ProcessedFile};
use crate::services::format_router::is_supported_upload;
use crate::services::pipeline::PDF_CONTENT_TYPE;
use crate::state::AppState;

pub async fn extract_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let start = Instant::now();
    let request_id = new_request_id();

    info!(request_id = %request_id, "Starting document extraction request");

    let limits = UploadLimits {
        declared_bytes: content_length(&headers),
        limit_mb: state.config.max_file_size_mb,
    };

    let file = match extract_file_from_multipart(&mut multipart, &limits).await {
        Ok(file) => {
            info!(
                request_id = %request_id,
                file_name = %file.name,
                file_size = file.size,
                content_type = ?file.mime_type,
                "File extracted from multipart form"
            );
            file
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Failed to extract file from multipart");
            return Err(e);
        }
    };

    check_file_size(&state, &request_id, file.size)?;

    let pipeline = state.pipeline.clone();
    let record = with_deadline(&state, &request_id, async move {
        pipeline
            .process_document(&file.content, Some(&file.name), file.mime_type.as_deref())
            .await
    })
    .await?;

    Ok(Json(finish(record, request_id, start)))
}

struct UploadLimits {
    declared_bytes: Option<usize>,
    limit_mb: usize,
}

impl UploadLimits {
    /// The body limit cuts the stream short; report that as an oversized file.
    fn map_error(&self, e: MultipartError, context: &str) -> AppError {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::FileTooLarge {
                size: self.declared_bytes.map_or(self.limit_mb, |bytes| bytes / (1024 * 1024)),
                limit: self.limit_mb,
            };
        }
        AppError::InvalidFile {
            message: format!("{}: {}", context, e),
        }
    }
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get("content-length")
        .and_then(|len| len.to_str().ok())
        .and_then(|len| len.parse().ok())
}

async fn extract_file_from_multipart(
    multipart: &mut Multipart,
    limits: &UploadLimits,
) -> AppResult<ProcessedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| limits.map_error(e, "Failed to read multipart field"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::validation("File name is required"))?;

        let content_type = field.content_type().map(|ct| ct.to_string());

        if !is_supported_upload(&file_name, content_type.as_deref()) {
            return Err(AppError::UnsupportedFormat);
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| limits.map_error(e, "Failed to read file data"))?;

        if data.is_empty() {
            return Err(AppError::InvalidFile {
                message: "File is empty".to_string(),
            });
        }

        let mut file = ProcessedFile::new(file_name, data);
        if let Some(mime_type) = content_type {
            file = file.with_mime_type(mime_type);
        }

        debug!(
            "Extracted file: {} ({} bytes, extension: {:?})",
            file.name,
            file.size,
            file.extension()
        );

        return Ok(file);
    }

    Err(AppError::MissingFile)
}

/// Raw PDF body, for clients of the legacy PDF-only endpoint.
pub async fn extract_binary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> AppResult<Json<ExtractResponse>> {
    let start = Instant::now();
    let request_id = new_request_id();

    info!(request_id = %request_id, "Starting binary PDF extraction request");

    let content_type = headers
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("");

    if !content_type.contains(PDF_CONTENT_TYPE) {
        warn!(
            request_id = %request_id,
            content_type = content_type,
            "Invalid content type for binary upload"
        );
        return Err(AppError::InvalidContentType);
    }

    if body.is_empty() {
        warn!(request_id = %request_id, "Empty body received");
        return Err(AppError::MissingFile);
    }

    check_file_size(&state, &request_id, body.len())?;

    let pipeline = state.pipeline.clone();
    let record = with_deadline(&state, &request_id, async move {
        pipeline.process_pdf(&body).await
    })
    .await?;

    Ok(Json(finish(record, request_id, start)))
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()[..8].to_string()
}

fn check_file_size(state: &AppState, request_id: &str, size: usize) -> AppResult<()> {
    let max_size_bytes = state.config.max_file_size_bytes();
    if size > max_size_bytes {
        warn!(
            request_id = %request_id,
            file_size = size,
            max_size = max_size_bytes,
            "File size exceeds limit"
        );
        return Err(AppError::FileTooLarge {
            size: size / (1024 * 1024),
            limit: state.config.max_file_size_mb,
        });
    }
    Ok(())
}

async fn with_deadline<F>(state: &AppState, request_id: &str, work: F) -> AppResult<ExtractedRecord>
where
    F: std::future::Future<Output = AppResult<ExtractedRecord>>,
{
    let deadline = Duration::from_secs(state.config.request_timeout_seconds);

    match tokio::time::timeout(deadline, work).await? {
        Ok(record) => Ok(record),
        Err(e) => {
            if e.is_provider_fault() {
                error!(request_id = %request_id, error = %e, "Model analysis failed");
            } else {
                warn!(request_id = %request_id, error = %e, "Document rejected");
            }
            Err(e)
        }
    }
}

fn finish(record: ExtractedRecord, request_id: String, start: Instant) -> ExtractResponse {
    let total_time = start.elapsed().as_millis() as u64;

    info!(
        request_id = %request_id,
        total_time_ms = total_time,
        char_count = record.char_count,
        "Request completed successfully"
    );

    ExtractResponse::new(record, request_id, total_time)
}
