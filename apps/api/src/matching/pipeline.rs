//! Pipeline entry points: fetch, match, or both, for one profile.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::aggregation::{FetchReport, JobAggregator, ProgressSink};
use crate::matching::matcher::JobMatcher;
use crate::models::{JobPosting, MatchedJob, Profile};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Profile must list at least one skill")]
    NoSkills,
}

/// Rejects profiles the pipeline cannot work with. Runs before any network call.
pub fn validate_profile(profile: &Profile) -> Result<(), PipelineError> {
    if profile.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(PipelineError::NoSkills);
    }
    Ok(())
}

/// Result of a fetch-then-match run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchedJob>,
    /// Postings fetched before matching.
    pub total: usize,
    pub sources: BTreeMap<String, usize>,
}

pub struct JobPipeline {
    aggregator: JobAggregator,
    matcher: JobMatcher,
}

impl JobPipeline {
    pub fn new(aggregator: JobAggregator, matcher: JobMatcher) -> Self {
        Self {
            aggregator,
            matcher,
        }
    }

    pub fn has_oracle(&self) -> bool {
        self.matcher.has_oracle()
    }

    pub async fn fetch(
        &self,
        profile: &Profile,
        progress: &mut dyn ProgressSink,
    ) -> Result<FetchReport, PipelineError> {
        validate_profile(profile)?;
        Ok(self.aggregator.fetch_all(profile, progress).await)
    }

    pub async fn match_jobs(
        &self,
        jobs: &[JobPosting],
        profile: &Profile,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<MatchedJob>, PipelineError> {
        validate_profile(profile)?;
        Ok(self.matcher.match_jobs(jobs, profile, progress).await)
    }

    /// Fetches every source, then matches.
    pub async fn run(
        &self,
        profile: &Profile,
        progress: &mut dyn ProgressSink,
    ) -> Result<MatchOutcome, PipelineError> {
        let report = self.fetch(profile, progress).await?;
        let matches = self.matcher.match_jobs(&report.jobs, profile, progress).await;
        info!(
            "Pipeline finished: {} matches from {} postings",
            matches.len(),
            report.jobs.len()
        );
        Ok(MatchOutcome {
            matches,
            total: report.jobs.len(),
            sources: report.sources,
        })
    }
}
