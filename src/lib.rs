//! Planreader document extraction service
//!
//! Reads health-insurance documents (PDF, DOCX, plain text, images), asks a
//! chat model for the plan data they contain and normalizes its reply into
//! a strict record.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::ExtractedRecord;
pub use services::DocumentPipeline;
pub use state::AppState;
