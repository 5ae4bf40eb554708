use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn, info};

use crate::error::AppError;
use crate::state::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    if !state.config.auth_enabled() {
        debug!("No API keys configured, skipping auth for {} {}", method, path);
        return Ok(next.run(request).await);
    }

    debug!("Authenticating request: {} {}", method, path);

    let auth_header = match request.headers().get("authorization") {
        Some(header) => match header.to_str() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid Authorization header format for {} {}", method, path);
                return Err(AppError::InvalidApiKey);
            }
        },
        None => {
            warn!("Missing Authorization header for {} {}", method, path);
            return Err(AppError::InvalidApiKey);
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => token,
        Some(_) => {
            warn!("Empty Bearer token for {} {}", method, path);
            return Err(AppError::InvalidApiKey);
        }
        None => {
            warn!("Authorization header missing Bearer prefix for {} {}", method, path);
            return Err(AppError::InvalidApiKey);
        }
    };

    if !state.config.validate_api_key(token) {
        let shown: String = token.chars().take(8).collect();
        warn!("Invalid API key attempted for {} {}: {}", method, path, shown);
        return Err(AppError::InvalidApiKey);
    }

    info!("Valid API key authenticated for {} {}", method, path);
    Ok(next.run(request).await)
}
