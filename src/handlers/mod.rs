pub mod extract;
pub mod health;

pub use extract::*;
pub use health::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::middleware::{auth::auth_middleware, rate_limit::rate_limit_middleware};
use crate::state::AppState;

// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// All routes, without the transport layers (tracing, CORS) added by `main`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size_bytes() + MULTIPART_OVERHEAD_BYTES;

    let extraction = Router::new()
        .route("/api/v1/pdf/extrair", post(extract_handler))
        .route("/api/v1/pdf/extrair/binary", post(extract_binary_handler))
        .layer(axum::middleware::from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/v1/pdf/health", get(document_health_handler))
        .merge(extraction)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
