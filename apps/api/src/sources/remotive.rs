//! Remotive aggregated remote-jobs API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::JobPosting;
use crate::sources::text::{clean_summary, RegionTable};
use crate::sources::{read_json, FetchContext, JobSource, SourceError, SourceReport};

const REMOTIVE_API_URL: &str = "https://remotive.com/api/remote-jobs";
const REMOTIVE_TIMEOUT: Duration = Duration::from_secs(25);
const REMOTIVE_LIMIT: u32 = 30;
const SOURCE_NAME: &str = "Remotive";

#[derive(Debug, Default, Deserialize)]
pub struct RemotiveResponse {
    #[serde(default)]
    pub jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemotiveJob {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub publication_date: Option<String>,
    pub candidate_required_location: Option<String>,
}

/// Maps the API payload into postings.
pub fn normalize(response: RemotiveResponse, regions: &RegionTable) -> Vec<JobPosting> {
    response
        .jobs
        .into_iter()
        .map(|j| {
            let title = j.title.unwrap_or_default();
            let description = j.description.unwrap_or_default();
            let location = j.candidate_required_location.unwrap_or_default();
            let location_tags = regions.tag(&format!("{title} {description} {location}"));
            JobPosting {
                summary: clean_summary(&description),
                company: j
                    .company_name
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                apply_url: j.url.unwrap_or_default(),
                source: SOURCE_NAME.to_string(),
                date_posted: j.publication_date.unwrap_or_default(),
                title,
                location,
                location_tags,
            }
        })
        .collect()
}

pub struct RemotiveSource {
    client: Client,
    regions: RegionTable,
}

impl RemotiveSource {
    pub fn new(client: Client, regions: RegionTable) -> Self {
        Self { client, regions }
    }

    async fn try_fetch(&self) -> Result<Vec<JobPosting>, SourceError> {
        let request = self
            .client
            .get(REMOTIVE_API_URL)
            .query(&[("limit", REMOTIVE_LIMIT)]);
        let response: RemotiveResponse = read_json(request, REMOTIVE_TIMEOUT).await?;
        Ok(normalize(response, &self.regions))
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch(&self, _ctx: &FetchContext) -> SourceReport {
        SourceReport::from_result(SOURCE_NAME, self.try_fetch().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    #[test]
    fn test_normalize_maps_fields() {
        let payload = r#"{
            "job-count": 1,
            "jobs": [{
                "id": 1,
                "title": "Payments Operations Specialist",
                "company_name": "Wise",
                "description": "<p>Run payouts across Europe</p>",
                "url": "https://remotive.com/jobs/1",
                "publication_date": "2025-10-01T00:00:00",
                "candidate_required_location": "Europe"
            }]
        }"#;
        let response: RemotiveResponse = serde_json::from_str(payload).unwrap();
        let jobs = normalize(response, &RegionTable::default());

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Wise");
        assert_eq!(jobs[0].summary, "Run payouts across Europe");
        assert_eq!(jobs[0].location, "Europe");
        assert_eq!(jobs[0].source, "Remotive");
        assert_eq!(jobs[0].location_tags, vec![Region::Europe]);
    }

    #[test]
    fn test_normalize_tolerates_missing_fields() {
        let response: RemotiveResponse =
            serde_json::from_str(r#"{"jobs": [{"title": null}]}"#).unwrap();
        let jobs = normalize(response, &RegionTable::default());
        assert_eq!(jobs[0].company, "Unknown");
        assert_eq!(jobs[0].title, "");
        assert_eq!(jobs[0].apply_url, "");
    }

    #[test]
    fn test_missing_jobs_key_is_empty() {
        let response: RemotiveResponse = serde_json::from_str("{}").unwrap();
        assert!(normalize(response, &RegionTable::default()).is_empty());
    }
}
