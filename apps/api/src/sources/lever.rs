//! Lever careers-page adapter. Walks a fixed employer roster one employer at a time.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::JobPosting;
use crate::sources::text::{clean_summary, RegionTable};
use crate::sources::{read_json, FetchContext, JobSource, Pacing, SourceError, SourceReport};

const LEVER_API_URL: &str = "https://api.lever.co/v0/postings";
const LEVER_TIMEOUT: Duration = Duration::from_secs(10);
const SOURCE_NAME: &str = "Lever";

/// Postings requested per employer.
pub const DEFAULT_MAX_PER_EMPLOYER: usize = 15;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeverPosting {
    pub text: Option<String>,
    pub description_plain: Option<String>,
    pub description: Option<String>,
    pub hosted_url: Option<String>,
    pub apply_url: Option<String>,
    pub created_at: Option<i64>,
    pub categories: Option<LeverCategories>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LeverCategories {
    pub location: Option<String>,
}

/// "fi-money" → "Fi-money".
pub fn display_name(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Epoch milliseconds → RFC 3339 with millisecond precision; "" when absent or out of range.
fn format_created_at(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Maps one employer's postings into [`JobPosting`]s.
pub fn normalize(
    employer: &str,
    postings: Vec<LeverPosting>,
    regions: &RegionTable,
) -> Vec<JobPosting> {
    let company = display_name(employer);
    postings
        .into_iter()
        .map(|p| {
            let title = p.text.unwrap_or_default();
            let location = p
                .categories
                .and_then(|c| c.location)
                .unwrap_or_default();
            let description = p
                .description_plain
                .filter(|d| !d.is_empty())
                .or(p.description)
                .unwrap_or_default();
            let location_tags = regions.tag(&format!("{title} {location}"));
            JobPosting {
                summary: clean_summary(&description),
                company: company.clone(),
                apply_url: p
                    .hosted_url
                    .filter(|u| !u.is_empty())
                    .or(p.apply_url)
                    .unwrap_or_default(),
                source: SOURCE_NAME.to_string(),
                date_posted: format_created_at(p.created_at),
                title,
                location,
                location_tags,
            }
        })
        .collect()
}

pub struct LeverSource {
    client: Client,
    employers: Vec<String>,
    max_per_employer: usize,
    pacing: Pacing,
    regions: RegionTable,
}

impl LeverSource {
    pub fn new(client: Client, employers: &[&str], pacing: Pacing, regions: RegionTable) -> Self {
        Self {
            client,
            employers: employers.iter().map(|e| e.to_string()).collect(),
            max_per_employer: DEFAULT_MAX_PER_EMPLOYER,
            pacing,
            regions,
        }
    }

    async fn fetch_employer(&self, employer: &str) -> Result<Vec<JobPosting>, SourceError> {
        let url = format!("{LEVER_API_URL}/{employer}");
        let limit = self.max_per_employer.to_string();
        let request = self
            .client
            .get(url)
            .query(&[("mode", "json"), ("limit", limit.as_str())]);
        let body: serde_json::Value = read_json(request, LEVER_TIMEOUT).await?;
        if !body.is_array() {
            return Err(SourceError::Parse(format!(
                "expected a postings array for '{employer}'"
            )));
        }
        let postings: Vec<LeverPosting> =
            serde_json::from_value(body).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(normalize(employer, postings, &self.regions))
    }
}

#[async_trait]
impl JobSource for LeverSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch(&self, _ctx: &FetchContext) -> SourceReport {
        let mut jobs = Vec::new();
        let mut failures = 0;

        for (index, employer) in self.employers.iter().enumerate() {
            self.pacing.before_call(index).await;
            match self.fetch_employer(employer).await {
                Ok(mut batch) => {
                    debug!("Lever {}: {} postings", employer, batch.len());
                    jobs.append(&mut batch);
                }
                Err(e) => {
                    warn!("Lever {} skipped: {}", employer, e);
                    failures += 1;
                }
            }
        }

        SourceReport::partial(SOURCE_NAME, jobs, failures, self.employers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    #[test]
    fn test_display_name_capitalizes_first_letter() {
        assert_eq!(display_name("razorpay"), "Razorpay");
        assert_eq!(display_name("fi-money"), "Fi-money");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_format_created_at() {
        assert_eq!(
            format_created_at(Some(1_700_000_000_000)),
            "2023-11-14T22:13:20.000Z"
        );
        assert_eq!(format_created_at(None), "");
    }

    #[test]
    fn test_normalize_prefers_plain_description_and_hosted_url() {
        let payload = r#"[{
            "text": "Payments Ops Associate",
            "descriptionPlain": "Handle merchant settlements",
            "description": "<div>ignored</div>",
            "hostedUrl": "https://jobs.lever.co/razorpay/1",
            "applyUrl": "https://jobs.lever.co/razorpay/1/apply",
            "createdAt": 1700000000000,
            "categories": {"location": "Bengaluru", "team": "Ops"}
        }]"#;
        let postings: Vec<LeverPosting> = serde_json::from_str(payload).unwrap();
        let jobs = normalize("razorpay", postings, &RegionTable::default());

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Razorpay");
        assert_eq!(jobs[0].summary, "Handle merchant settlements");
        assert_eq!(jobs[0].apply_url, "https://jobs.lever.co/razorpay/1");
        assert_eq!(jobs[0].location, "Bengaluru");
        assert_eq!(jobs[0].location_tags, vec![Region::Asia]);
        assert_eq!(jobs[0].source, "Lever");
    }

    #[test]
    fn test_normalize_falls_back_to_html_description() {
        let payload = r#"[{"text": "Analyst", "description": "<p>Reports</p>", "applyUrl": "https://x/apply"}]"#;
        let postings: Vec<LeverPosting> = serde_json::from_str(payload).unwrap();
        let jobs = normalize("cred", postings, &RegionTable::default());
        assert_eq!(jobs[0].summary, "Reports");
        assert_eq!(jobs[0].apply_url, "https://x/apply");
        assert_eq!(jobs[0].date_posted, "");
    }
}
