//! Axum route handlers for the Jobs API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::aggregation::aggregator::source_breakdown;
use crate::aggregation::ProgressLog;
use crate::errors::AppError;
use crate::models::{JobPosting, MatchedJob, Profile};
use crate::sources::SourceReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FetchJobsRequest {
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct FetchJobsResponse {
    pub jobs: Vec<JobPosting>,
    pub sources: BTreeMap<String, usize>,
    pub queries: Vec<String>,
    pub source_reports: Vec<SourceReport>,
    pub logs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    pub profile: Profile,
    /// Postings from an earlier fetch. When absent every source is fetched first.
    #[serde(default)]
    pub jobs: Option<Vec<JobPosting>>,
}

#[derive(Debug, Serialize)]
pub struct MatchJobsResponse {
    pub matches: Vec<MatchedJob>,
    pub total: usize,
    pub sources: BTreeMap<String, usize>,
    pub logs: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/fetch
///
/// Fetches postings from every source for the profile. Source failures shrink the
/// list and show up in `source_reports`; they never fail the request.
pub async fn handle_fetch_jobs(
    State(state): State<AppState>,
    Json(request): Json<FetchJobsRequest>,
) -> Result<Json<FetchJobsResponse>, AppError> {
    let mut log = ProgressLog::new();
    let span = info_span!("fetch_jobs", run_id = %Uuid::new_v4());
    let report = state
        .pipeline
        .fetch(&request.profile, &mut log)
        .instrument(span)
        .await?;

    Ok(Json(FetchJobsResponse {
        jobs: report.jobs,
        sources: report.sources,
        queries: report.queries,
        source_reports: report.source_reports,
        logs: log.into_messages(),
    }))
}

/// POST /api/v1/jobs/match
///
/// Scores and ranks postings for the profile. An empty `matches` list is a normal result.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchJobsRequest>,
) -> Result<Json<MatchJobsResponse>, AppError> {
    let mut log = ProgressLog::new();
    let span = info_span!("match_jobs", run_id = %Uuid::new_v4());

    let response = match request.jobs {
        Some(jobs) => {
            let matches = state
                .pipeline
                .match_jobs(&jobs, &request.profile, &mut log)
                .instrument(span)
                .await?;
            MatchJobsResponse {
                matches,
                total: jobs.len(),
                sources: source_breakdown(&jobs),
                logs: Vec::new(),
            }
        }
        None => {
            let outcome = state
                .pipeline
                .run(&request.profile, &mut log)
                .instrument(span)
                .await?;
            MatchJobsResponse {
                matches: outcome.matches,
                total: outcome.total,
                sources: outcome.sources,
                logs: Vec::new(),
            }
        }
    };

    Ok(Json(MatchJobsResponse {
        logs: log.into_messages(),
        ..response
    }))
}
