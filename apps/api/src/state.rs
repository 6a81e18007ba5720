use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::JobPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no OpenRouter key is configured.
    pub llm: Option<LlmClient>,
    pub pipeline: Arc<JobPipeline>,
}
