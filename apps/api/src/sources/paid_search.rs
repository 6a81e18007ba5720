//! Shared driver for the query-based paid search APIs (SerpAPI, JSearch).
//!
//! One HTTP call per query, strictly sequential with a [`Pacing`] delay, skipped
//! entirely without a credential, and deduplicated by title+company within a run.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::JobPosting;
use crate::sources::{FetchContext, JobSource, Pacing, SourceError, SourceReport};

/// One provider's single-query call.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Queries issued per run at most.
    fn max_queries(&self) -> usize;

    async fn search(
        &self,
        api_key: &str,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<JobPosting>, SourceError>;
}

pub struct PaidSearchSource<B> {
    backend: B,
    api_key: Option<String>,
    pacing: Pacing,
}

impl<B: QueryBackend> PaidSearchSource<B> {
    pub fn new(backend: B, api_key: Option<String>, pacing: Pacing) -> Self {
        Self {
            backend,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            pacing,
        }
    }
}

fn dedup_key(job: &JobPosting) -> String {
    format!("{}__{}", job.title, job.company).to_lowercase()
}

#[async_trait]
impl<B: QueryBackend> JobSource for PaidSearchSource<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn fetch(&self, ctx: &FetchContext) -> SourceReport {
        let name = self.backend.name();
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("{} skipped: no API key configured", name);
            return SourceReport::skipped(name, "no API key configured");
        };
        if ctx.queries.is_empty() {
            return SourceReport::skipped(name, "no search queries");
        }

        let queries: Vec<&String> = ctx.queries.iter().take(self.backend.max_queries()).collect();
        let mut seen = HashSet::new();
        let mut jobs = Vec::new();
        let mut failures = 0;

        for (index, query) in queries.iter().enumerate() {
            self.pacing.before_call(index).await;
            match self
                .backend
                .search(api_key, query, ctx.location.as_deref())
                .await
            {
                Ok(batch) => {
                    debug!("{} query {:?}: {} results", name, query, batch.len());
                    jobs.extend(batch.into_iter().filter(|j| seen.insert(dedup_key(j))));
                }
                Err(e) => {
                    warn!("{} query {:?} failed: {}", name, query, e);
                    failures += 1;
                }
            }
        }

        SourceReport::partial(name, jobs, failures, queries.len())
    }
}
