use serde::{Deserialize, Serialize};

use super::ExtractedRecord;

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub data: ExtractedRecord,
    pub request_id: String,
    pub processing_time_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentServiceHealth {
    pub status: String,
    pub service: String,
    pub ai_model: String,
    pub max_file_size: String,
}

impl ExtractResponse {
    pub fn new(data: ExtractedRecord, request_id: String, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            data,
            request_id,
            processing_time_ms,
        }
    }
}

impl DocumentServiceHealth {
    pub fn healthy(ai_model: impl Into<String>, max_file_size_mb: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            service: "document-extraction".to_string(),
            ai_model: ai_model.into(),
            max_file_size: format!("{}MB", max_file_size_mb),
        }
    }
}
