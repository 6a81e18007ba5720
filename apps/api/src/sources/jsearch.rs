//! JSearch (RapidAPI) backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::JobPosting;
use crate::sources::paid_search::QueryBackend;
use crate::sources::text::{clean_summary, RegionTable};
use crate::sources::{read_json, SourceError};

const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_TIMEOUT: Duration = Duration::from_secs(15);
const SOURCE_NAME: &str = "JSearch";
const MAX_QUERIES: usize = 5;

/// Minimum delay between JSearch calls.
pub const DEFAULT_PACING_MS: u64 = 1200;

#[derive(Debug, Default, Deserialize)]
pub struct JSearchResponse {
    #[serde(default)]
    pub data: Vec<JSearchJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JSearchJob {
    pub job_title: Option<String>,
    pub employer_name: Option<String>,
    pub job_description: Option<String>,
    pub job_apply_link: Option<String>,
    pub job_publisher: Option<String>,
    pub job_city: Option<String>,
    pub job_state: Option<String>,
    pub job_country: Option<String>,
    pub job_posted_at_datetime_utc: Option<String>,
}

/// The free-text query JSearch expects: "{query} in {location}".
fn search_phrase(query: &str, location: Option<&str>) -> String {
    match location {
        Some(location) => format!("{query} in {location}"),
        None => query.to_string(),
    }
}

pub fn normalize(response: JSearchResponse, regions: &RegionTable) -> Vec<JobPosting> {
    response
        .data
        .into_iter()
        .map(|job| {
            let title = job.job_title.unwrap_or_default();
            let description = job.job_description.unwrap_or_default();
            let city = job.job_city.unwrap_or_default();
            let country = job.job_country.unwrap_or_default();
            let state = job.job_state.unwrap_or_default();
            let location = [city.as_str(), state.as_str(), country.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            let location_tags = regions.tag(&format!("{title} {description} {city} {country}"));
            JobPosting {
                company: job
                    .employer_name
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                summary: clean_summary(&description),
                apply_url: job.job_apply_link.unwrap_or_default(),
                source: job
                    .job_publisher
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| SOURCE_NAME.to_string()),
                date_posted: job.job_posted_at_datetime_utc.unwrap_or_default(),
                title,
                location,
                location_tags,
            }
        })
        .collect()
}

pub struct JSearchBackend {
    client: Client,
    regions: RegionTable,
}

impl JSearchBackend {
    pub fn new(client: Client, regions: RegionTable) -> Self {
        Self { client, regions }
    }
}

#[async_trait]
impl QueryBackend for JSearchBackend {
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
        let phrase = search_phrase(query, location);
        let request = self
            .client
            .get(JSEARCH_URL)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&[("query", phrase.as_str()), ("num_pages", "1")]);
        let response: JSearchResponse = read_json(request, JSEARCH_TIMEOUT).await?;
        Ok(normalize(response, &self.regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    #[test]
    fn test_search_phrase() {
        assert_eq!(
            search_phrase("ops analyst", Some("Karnataka")),
            "ops analyst in Karnataka"
        );
        assert_eq!(search_phrase("ops analyst", None), "ops analyst");
    }

    #[test]
    fn test_normalize_joins_location_parts() {
        let payload = r#"{
            "status": "OK",
            "data": [{
                "job_title": "Payments Operations Associate",
                "employer_name": "Paytm",
                "job_description": "Reconcile merchant payouts",
                "job_apply_link": "https://paytm.com/careers/1",
                "job_publisher": "LinkedIn",
                "job_city": "Noida",
                "job_state": null,
                "job_country": "IN",
                "job_posted_at_datetime_utc": "2025-10-01T08:00:00.000Z"
            }]
        }"#;
        let response: JSearchResponse = serde_json::from_str(payload).unwrap();
        let jobs = normalize(response, &RegionTable::default());

        assert_eq!(jobs[0].location, "Noida, IN");
        assert_eq!(jobs[0].source, "LinkedIn");
        assert_eq!(jobs[0].company, "Paytm");
        assert_eq!(jobs[0].location_tags, vec![Region::Global]);
    }

    #[test]
    fn test_missing_publisher_defaults_to_jsearch() {
        let response: JSearchResponse =
            serde_json::from_str(r#"{"data": [{"job_title": "Analyst"}]}"#).unwrap();
        let jobs = normalize(response, &RegionTable::default());
        assert_eq!(jobs[0].source, "JSearch");
        assert_eq!(jobs[0].location, "");
    }
}
