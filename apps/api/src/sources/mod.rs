//! Job sources: independent fetchers that normalize postings into [`JobPosting`].
//!
//! Adapters never fail the caller. Each returns a [`SourceReport`] holding whatever it
//! managed to collect and a [`SourceStatus`] saying why the list may be short.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::models::JobPosting;

pub mod catalog;
pub mod feed;
pub mod jsearch;
pub mod lever;
pub mod paid_search;
pub mod remotive;
pub mod serpapi;
pub mod text;

pub const USER_AGENT: &str = "JobBot/1.0";

/// Errors raised inside an adapter. Converted into a [`SourceStatus`] before leaving it.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("unexpected payload: {0}")]
    Parse(String),
}

/// How an adapter run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    /// Some calls in a multi-call run failed; the rest contributed.
    Partial { failures: usize },
    /// Not attempted, e.g. no credential configured.
    Skipped { reason: String },
    Failed { reason: String },
}

/// Outcome of one adapter run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(skip)]
    pub jobs: Vec<JobPosting>,
    pub count: usize,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn ok(source: &str, jobs: Vec<JobPosting>) -> Self {
        Self::with_status(source, jobs, SourceStatus::Ok)
    }

    pub fn skipped(source: &str, reason: impl Into<String>) -> Self {
        Self::with_status(
            source,
            Vec::new(),
            SourceStatus::Skipped {
                reason: reason.into(),
            },
        )
    }

    pub fn failed(source: &str, error: &SourceError) -> Self {
        warn!("Source {} failed: {}", source, error);
        Self::with_status(
            source,
            Vec::new(),
            SourceStatus::Failed {
                reason: error.to_string(),
            },
        )
    }

    /// Report for a multi-call run where `failures` of the calls failed.
    pub fn partial(source: &str, jobs: Vec<JobPosting>, failures: usize, attempts: usize) -> Self {
        let status = match failures {
            0 => SourceStatus::Ok,
            f if f >= attempts => SourceStatus::Failed {
                reason: format!("all {attempts} calls failed"),
            },
            f => SourceStatus::Partial { failures: f },
        };
        Self::with_status(source, jobs, status)
    }

    fn with_status(source: &str, jobs: Vec<JobPosting>, status: SourceStatus) -> Self {
        Self {
            source: source.to_string(),
            count: jobs.len(),
            jobs,
            status,
        }
    }

    /// Folds a single-call result into a report.
    pub fn from_result(source: &str, result: Result<Vec<JobPosting>, SourceError>) -> Self {
        match result {
            Ok(jobs) => Self::ok(source, jobs),
            Err(e) => Self::failed(source, &e),
        }
    }
}

/// Inputs derived from the profile that sources may use.
#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    pub queries: Vec<String>,
    pub location: Option<String>,
    /// The candidate targets a concrete country rather than "anywhere".
    pub prioritize_local: bool,
}

/// Fixed delay between consecutive calls of a sequential adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub between_calls: Duration,
}

impl Pacing {
    pub const fn millis(ms: u64) -> Self {
        Self {
            between_calls: Duration::from_millis(ms),
        }
    }

    pub const fn none() -> Self {
        Self::millis(0)
    }

    /// Sleeps before every call except the first.
    pub async fn before_call(&self, index: usize) {
        if index > 0 && !self.between_calls.is_zero() {
            tokio::time::sleep(self.between_calls).await;
        }
    }
}

/// Trait for implementing job sources.
///
/// The aggregator holds these as `Arc<dyn JobSource>` so tests can plug in fakes.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Name used in logs and in the per-source breakdown.
    fn name(&self) -> &str;

    /// Fetches and normalizes postings. Never returns an error.
    async fn fetch(&self, ctx: &FetchContext) -> SourceReport;
}

/// Reads a successful response body, mapping non-2xx statuses to [`SourceError::Status`].
pub(crate) async fn read_body(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<String, SourceError> {
    let response = request.timeout(timeout).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Reads a successful response and deserializes it as JSON.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<T, SourceError> {
    let body = read_body(request, timeout).await?;
    serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
}
