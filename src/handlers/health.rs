use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::models::DocumentServiceHealth;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    info!("Health check requested");

    let timestamp = chrono::Utc::now().timestamp();
    let metrics = state.limiter.metrics();
    let status = if metrics.available_permits > 0 {
        "healthy"
    } else {
        "degraded"
    };

    let response = json!({
        "status": status,
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "document_pipeline": true,
            "ai_model": state.pipeline.model_name(),
            "auth_enabled": state.config.auth_enabled()
        },
        "rate_limiting": {
            "total_requests": metrics.total_requests,
            "rejected_requests": metrics.rejected_requests,
            "available_permits": metrics.available_permits,
            "rejection_rate": if metrics.total_requests > 0 {
                (metrics.rejected_requests as f64 / metrics.total_requests as f64 * 100.0).round() / 100.0
            } else {
                0.0
            }
        }
    });

    info!(
        status = status,
        available_permits = metrics.available_permits,
        "Health check completed"
    );

    Json(response)
}

/// Readiness check endpoint (for Kubernetes/Railway)
pub async fn ready_handler(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    if state.limiter.available_permits() > 0 {
        info!("Readiness check passed");
        Ok(StatusCode::OK)
    } else {
        info!("Readiness check failed - no request permits available");
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// Health of the document extraction service itself.
pub async fn document_health_handler(State(state): State<AppState>) -> Json<DocumentServiceHealth> {
    Json(DocumentServiceHealth::healthy(
        state.pipeline.model_name(),
        state.config.max_file_size_mb,
    ))
}
