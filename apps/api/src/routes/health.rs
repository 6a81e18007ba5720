use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and which optional
/// integrations are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobbot-api",
        "integrations": {
            "llm": state.pipeline.has_oracle(),
            "serpapi": state.config.serpapi_key.is_some(),
            "jsearch": state.config.jsearch_key.is_some(),
        }
    }))
}
