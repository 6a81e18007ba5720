//! SerpAPI Google Jobs backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::JobPosting;
use crate::sources::paid_search::QueryBackend;
use crate::sources::text::{clean_summary, RegionTable};
use crate::sources::{read_json, SourceError};

const SERPAPI_URL: &str = "https://serpapi.com/search.json";
const SERPAPI_TIMEOUT: Duration = Duration::from_secs(15);
const SOURCE_NAME: &str = "SerpAPI";
const MAX_QUERIES: usize = 6;

/// Minimum delay between SerpAPI calls.
pub const DEFAULT_PACING_MS: u64 = 1100;

#[derive(Debug, Default, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub jobs_results: Vec<SerpApiJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SerpApiJob {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub via: Option<String>,
    pub apply_link: Option<String>,
    pub related_links: Vec<RelatedLink>,
    pub detected_extensions: Option<DetectedExtensions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelatedLink {
    pub link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetectedExtensions {
    pub posted_at: Option<String>,
}

/// "via LinkedIn" → "LinkedIn"; missing publisher → "Google Jobs".
fn publisher(via: Option<&str>) -> String {
    let name = via.unwrap_or_default().replace("via ", "");
    let name = name.trim();
    if name.is_empty() {
        "Google Jobs".to_string()
    } else {
        name.to_string()
    }
}

pub fn normalize(response: SerpApiResponse, regions: &RegionTable) -> Vec<JobPosting> {
    response
        .jobs_results
        .into_iter()
        .map(|job| {
            let title = job.title.unwrap_or_default();
            let description = job.description.unwrap_or_default();
            let location = job.location.unwrap_or_default();
            let location_tags = regions.tag(&format!("{title} {description} {location}"));
            let apply_url = job
                .apply_link
                .filter(|l| !l.is_empty())
                .or_else(|| job.related_links.into_iter().next().and_then(|r| r.link))
                .unwrap_or_default();
            JobPosting {
                company: job
                    .company_name
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                summary: clean_summary(&description),
                apply_url,
                source: publisher(job.via.as_deref()),
                date_posted: job
                    .detected_extensions
                    .and_then(|e| e.posted_at)
                    .unwrap_or_default(),
                title,
                location,
                location_tags,
            }
        })
        .collect()
}

pub struct SerpApiBackend {
    client: Client,
    regions: RegionTable,
}

impl SerpApiBackend {
    pub fn new(client: Client, regions: RegionTable) -> Self {
        Self { client, regions }
    }
}

#[async_trait]
impl QueryBackend for SerpApiBackend {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn max_queries(&self) -> usize {
        MAX_QUERIES
    }

    async fn search(
        &self,
        api_key: &str,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let mut params = vec![
            ("engine", "google_jobs"),
            ("q", query),
            ("api_key", api_key),
            ("num", "10"),
        ];
        if let Some(location) = location {
            params.push(("location", location));
        }
        let request = self.client.get(SERPAPI_URL).query(&params);
        let response: SerpApiResponse = read_json(request, SERPAPI_TIMEOUT).await?;
        Ok(normalize(response, &self.regions))
    }
}
