use std::sync::Arc;

use crate::config::Config;
use crate::middleware::RequestLimiter;
use crate::services::{AnalysisSettings, ChatModel, DocumentPipeline};

/// Shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<DocumentPipeline>,
    pub limiter: Arc<RequestLimiter>,
}

impl AppState {
    pub fn new(config: Config, model: Arc<dyn ChatModel>) -> Self {
        let pipeline = DocumentPipeline::new(model, AnalysisSettings::from(&config.llm));
        let limiter = RequestLimiter::new(config.max_concurrent_requests);

        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            limiter: Arc::new(limiter),
        }
    }
}
