use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::aggregation::progress::ProgressSink;
use crate::aggregation::queries::build_queries;
use crate::config::Config;
use crate::models::{JobPosting, Profile};
use crate::sources::catalog::{
    JOBICY_FEED, LEVER_COMPANIES, LOCAL_FOCUS_WWR_FEEDS, REMOTEOK_FEED, WWR_FEEDS,
};
use crate::sources::feed::FeedSource;
use crate::sources::jsearch::{self, JSearchBackend};
use crate::sources::lever::LeverSource;
use crate::sources::paid_search::PaidSearchSource;
use crate::sources::remotive::RemotiveSource;
use crate::sources::serpapi::{self, SerpApiBackend};
use crate::sources::text::RegionTable;
use crate::sources::{FetchContext, JobSource, Pacing, SourceReport};

const REMOTEOK_MAX_ITEMS: usize = 100;

/// Everything one aggregation run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub jobs: Vec<JobPosting>,
    /// Unique postings per `JobPosting::source`.
    pub sources: BTreeMap<String, usize>,
    pub queries: Vec<String>,
    pub source_reports: Vec<SourceReport>,
}

/// Runs the source roster in three phases: concurrent feeds and APIs, then the
/// careers-page adapters, then paid search. Each later phase runs its adapters one
/// after another so their own pacing governs the request rate.
pub struct JobAggregator {
    concurrent: Vec<Arc<dyn JobSource>>,
    careers: Vec<Arc<dyn JobSource>>,
    search: Vec<Arc<dyn JobSource>>,
}

impl JobAggregator {
    pub fn new(
        concurrent: Vec<Arc<dyn JobSource>>,
        careers: Vec<Arc<dyn JobSource>>,
        search: Vec<Arc<dyn JobSource>>,
    ) -> Self {
        Self {
            concurrent,
            careers,
            search,
        }
    }

    /// The production roster wired to live endpoints.
    pub fn from_config(config: &Config, client: Client) -> Self {
        let regions = RegionTable::default();
        let pacing = |ms: u64| {
            if config.disable_pacing {
                Pacing::none()
            } else {
                Pacing::millis(ms)
            }
        };

        let concurrent: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(
                FeedSource::new(client.clone(), "WeWorkRemotely", WWR_FEEDS, regions)
                    .with_local_focus(LOCAL_FOCUS_WWR_FEEDS),
            ),
            Arc::new(
                FeedSource::new(client.clone(), "RemoteOK", &[REMOTEOK_FEED], regions)
                    .with_max_items(REMOTEOK_MAX_ITEMS),
            ),
            Arc::new(FeedSource::new(
                client.clone(),
                "Jobicy",
                &[JOBICY_FEED],
                regions,
            )),
            Arc::new(RemotiveSource::new(client.clone(), regions)),
        ];

        let careers: Vec<Arc<dyn JobSource>> = vec![Arc::new(LeverSource::new(
            client.clone(),
            LEVER_COMPANIES,
            pacing(0),
            regions,
        ))];

        let search: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(PaidSearchSource::new(
                SerpApiBackend::new(client.clone(), regions),
                config.serpapi_key.clone(),
                pacing(serpapi::DEFAULT_PACING_MS),
            )),
            Arc::new(PaidSearchSource::new(
                JSearchBackend::new(client, regions),
                config.jsearch_key.clone(),
                pacing(jsearch::DEFAULT_PACING_MS),
            )),
        ];

        Self::new(concurrent, careers, search)
    }

    pub async fn fetch_all(
        &self,
        profile: &Profile,
        progress: &mut dyn ProgressSink,
    ) -> FetchReport {
        let plan = build_queries(profile);
        let ctx = FetchContext {
            queries: plan.queries.clone(),
            location: plan.location.clone(),
            prioritize_local: !profile.is_remote_only(),
        };
        debug!("Search plan: {:?}", plan);

        let mut reports = Vec::new();
        let mut running = 0;

        progress.report(&format!(
            "Fetching from {} feeds and APIs...",
            self.concurrent.len()
        ));
        let concurrent = join_all(self.concurrent.iter().map(|s| s.fetch(&ctx))).await;
        for report in concurrent {
            running += report.count;
            reports.push(report);
        }
        progress.report(&format!("Feeds: {running} jobs."));

        for source in &self.careers {
            progress.report(&format!("Fetching {} careers pages...", source.name()));
            let report = source.fetch(&ctx).await;
            running += report.count;
            progress.report(&format!("+{} from {}.", report.count, report.source));
            reports.push(report);
        }

        if !ctx.queries.is_empty() {
            for source in &self.search {
                let report = source.fetch(&ctx).await;
                if report.count > 0 {
                    running += report.count;
                    progress.report(&format!("+{} from {}.", report.count, report.source));
                }
                reports.push(report);
            }
        }

        let collected: Vec<JobPosting> =
            reports.iter_mut().flat_map(|r| r.jobs.drain(..)).collect();
        let jobs = dedup_by_apply_url(collected);
        let sources = source_breakdown(&jobs);
        progress.report(&format!(
            "Total: {} unique jobs ({} duplicates removed)",
            jobs.len(),
            running - jobs.len()
        ));

        FetchReport {
            jobs,
            sources,
            queries: plan.queries,
            source_reports: reports,
        }
    }
}

/// Keeps the first posting per non-empty apply URL. Postings without a URL are all kept.
pub fn dedup_by_apply_url(jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| job.apply_url.is_empty() || seen.insert(job.apply_url.clone()))
        .collect()
}

pub fn source_breakdown(jobs: &[JobPosting]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for job in jobs {
        *counts.entry(job.source.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::progress::ProgressLog;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn job(title: &str, url: &str, source: &str) -> JobPosting {
        JobPosting {
            title: title.into(),
            apply_url: url.into(),
            source: source.into(),
            ..JobPosting::default()
        }
    }

    struct FakeSource {
        name: &'static str,
        jobs: Vec<JobPosting>,
        calls: AtomicUsize,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl FakeSource {
        fn new(
            name: &'static str,
            jobs: Vec<JobPosting>,
            order: Arc<Mutex<Vec<&'static str>>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                name,
                jobs,
                calls: AtomicUsize::new(0),
                order,
            })
        }
    }

    #[async_trait]
    impl JobSource for FakeSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, _ctx: &FetchContext) -> SourceReport {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.order.lock().unwrap().push(self.name);
            SourceReport::ok(self.name, self.jobs.clone())
        }
    }

    fn profile() -> Profile {
        Profile {
            skills: vec!["fintech".into()],
            headline: "Payments Analyst".into(),
            country: "India".into(),
            ..Profile::default()
        }
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let jobs = vec![
            job("First", "https://x/1", "A"),
            job("Second", "https://x/1", "B"),
            job("Third", "https://x/2", "B"),
        ];
        let unique = dedup_by_apply_url(jobs);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "First");
    }

    #[test]
    fn test_empty_urls_never_dedup() {
        let jobs = vec![job("A", "", "X"), job("B", "", "X")];
        assert_eq!(dedup_by_apply_url(jobs).len(), 2);
    }

    #[test]
    fn test_source_breakdown_counts() {
        let jobs = vec![
            job("A", "", "Remotive"),
            job("B", "", "Remotive"),
            job("C", "", "LinkedIn"),
        ];
        let counts = source_breakdown(&jobs);
        assert_eq!(counts["Remotive"], 2);
        assert_eq!(counts["LinkedIn"], 1);
    }

    #[tokio::test]
    async fn test_fetch_all_phases_and_dedup() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let feed = FakeSource::new(
            "Feed",
            vec![job("Ops", "https://x/1", "Feed"), job("Analyst", "https://x/2", "Feed")],
            order.clone(),
        );
        let careers = FakeSource::new(
            "Lever",
            vec![job("Ops again", "https://x/1", "Lever")],
            order.clone(),
        );
        let search = FakeSource::new(
            "SerpAPI",
            vec![job("Payments", "https://x/3", "LinkedIn")],
            order.clone(),
        );

        let aggregator = JobAggregator::new(
            vec![feed as Arc<dyn JobSource>],
            vec![careers as Arc<dyn JobSource>],
            vec![search as Arc<dyn JobSource>],
        );
        let mut log = ProgressLog::new();
        let report = aggregator.fetch_all(&profile(), &mut log).await;

        assert_eq!(*order.lock().unwrap(), vec!["Feed", "Lever", "SerpAPI"]);
        assert_eq!(report.jobs.len(), 3);
        assert_eq!(report.jobs[0].title, "Ops");
        assert_eq!(report.sources["Feed"], 2);
        assert_eq!(report.sources["LinkedIn"], 1);
        assert!(!report.sources.contains_key("Lever"));
        assert_eq!(report.source_reports.len(), 3);
        assert!(report.queries.contains(&"Payments Analyst".to_string()));
        assert!(log.messages().last().unwrap().starts_with("Total: 3 unique jobs"));
    }

    #[tokio::test]
    async fn test_search_phase_skipped_without_queries() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let search = FakeSource::new("SerpAPI", vec![job("X", "https://x/9", "LinkedIn")], order);
        let aggregator = JobAggregator::new(vec![], vec![], vec![search.clone() as Arc<dyn JobSource>]);

        let empty = Profile {
            skills: vec!["a long multi word skill name".into()],
            ..Profile::default()
        };
        let report = aggregator.fetch_all(&empty, &mut ProgressLog::new()).await;

        assert!(report.queries.is_empty());
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert!(report.jobs.is_empty());
    }
}
