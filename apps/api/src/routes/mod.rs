pub mod health;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};

use crate::cover_letter::handlers as cover_letter;
use crate::matching::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Upload cap for resume PDFs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route("/api/v1/jobs/fetch", post(jobs::handle_fetch_jobs))
        .route("/api/v1/jobs/match", post(jobs::handle_match_jobs))
        // Profile API
        .route(
            "/api/v1/profile/parse",
            post(resume::handle_parse_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Cover Letter API
        .route("/api/v1/cover-letter", post(cover_letter::handle_cover_letter))
        .with_state(state)
}
