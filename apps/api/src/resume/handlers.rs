//! Axum route handlers for the Profile API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Profile;
use crate::resume::parser::parse_resume;
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub profile: Profile,
}

/// POST /api/v1/profile/parse
///
/// Accepts a multipart upload with a `file` field holding a PDF resume and returns the
/// profile fields the LLM could extract. Country, state and experience are left for
/// the user to fill in.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("OPENROUTER_API_KEY not configured".to_string()))?;

    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() == Some(FILE_FIELD) {
            upload = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            );
            break;
        }
    }

    let pdf = upload
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let profile = parse_resume(llm, pdf).await?;
    Ok(Json(ParseResumeResponse { profile }))
}
