//! Axum route handlers for the Cover Letter API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cover_letter::write_cover_letter;
use crate::errors::AppError;
use crate::models::{JobPosting, Profile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub job: JobPosting,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub letter: String,
}

/// POST /api/v1/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("OPENROUTER_API_KEY not configured".to_string()))?;

    let letter = write_cover_letter(llm, &request.job, &request.profile).await?;
    Ok(Json(CoverLetterResponse { letter }))
}
