//! RSS feed adapter (WeWorkRemotely, RemoteOK, Jobicy).
//!
//! Items are pulled out by tag extraction rather than a full XML parse: job feeds
//! are routinely malformed and only four fields are needed.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::JobPosting;
use crate::sources::text::{clean_summary, split_company_title, RegionTable};
use crate::sources::{read_body, FetchContext, JobSource, SourceError, SourceReport, USER_AGENT};

const FEED_TIMEOUT: Duration = Duration::from_secs(25);

/// Items read per feed unless overridden.
pub const DEFAULT_MAX_ITEMS: usize = 50;

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<item>(.*?)</item>").unwrap());
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("title"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("link"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("description"));
static PUB_DATE_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("pubDate"));

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)<{tag}[^>]*>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</{tag}>"
    ))
    .unwrap()
}

/// The four fields read from each `<item>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}

/// Extracts every `<item>` block in document order.
pub fn parse_items(xml: &str) -> Vec<FeedItem> {
    let field = |re: &Regex, block: &str| {
        re.captures(block)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    ITEM_RE
        .captures_iter(xml)
        .filter_map(|c| c.get(1))
        .map(|block| {
            let block = block.as_str();
            FeedItem {
                title: field(&TITLE_RE, block),
                link: field(&LINK_RE, block),
                description: field(&DESCRIPTION_RE, block),
                pub_date: field(&PUB_DATE_RE, block),
            }
        })
        .collect()
}

/// Normalizes a feed document into postings, keeping at most `max_items`.
pub fn parse_feed(
    xml: &str,
    source: &str,
    max_items: usize,
    regions: &RegionTable,
) -> Vec<JobPosting> {
    parse_items(xml)
        .into_iter()
        .take(max_items)
        .map(|item| {
            let (company, role) = split_company_title(&item.title);
            let title = if role.is_empty() { item.title.clone() } else { role };
            let summary = clean_summary(&item.description);
            let location_tags = regions.tag(&format!("{title} {summary}"));
            JobPosting {
                title,
                company,
                summary,
                apply_url: item.link,
                source: source.to_string(),
                date_posted: item.pub_date,
                location: String::new(),
                location_tags,
            }
        })
        .collect()
}

/// One named source backed by one or more RSS URLs, fetched concurrently.
pub struct FeedSource {
    name: String,
    urls: Vec<String>,
    /// URLs polled when the candidate is location-focused; `None` means all.
    local_focus: Option<usize>,
    max_items: usize,
    client: Client,
    regions: RegionTable,
}

impl FeedSource {
    pub fn new(client: Client, name: &str, urls: &[&str], regions: RegionTable) -> Self {
        Self {
            name: name.to_string(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
            local_focus: None,
            max_items: DEFAULT_MAX_ITEMS,
            client,
            regions,
        }
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Only the first `count` URLs are polled for location-focused candidates.
    pub fn with_local_focus(mut self, count: usize) -> Self {
        self.local_focus = Some(count);
        self
    }

    fn urls_for(&self, ctx: &FetchContext) -> &[String] {
        match self.local_focus {
            Some(count) if ctx.prioritize_local => &self.urls[..count.min(self.urls.len())],
            _ => &self.urls,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<JobPosting>, SourceError> {
        let request = self.client.get(url).header("User-Agent", USER_AGENT);
        let xml = read_body(request, FEED_TIMEOUT).await?;
        let jobs = parse_feed(&xml, &self.name, self.max_items, &self.regions);
        debug!("{}: {} items from {}", self.name, jobs.len(), url);
        Ok(jobs)
    }
}

#[async_trait]
impl JobSource for FeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, ctx: &FetchContext) -> SourceReport {
        let urls = self.urls_for(ctx);
        let results = join_all(urls.iter().map(|url| self.fetch_url(url))).await;

        let mut jobs = Vec::new();
        let mut failures = 0;
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(mut batch) => jobs.append(&mut batch),
                Err(e) => {
                    warn!("RSS {} failed ({}): {}", self.name, url, e);
                    failures += 1;
                }
            }
        }

        SourceReport::partial(&self.name, jobs, failures, urls.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>We Work Remotely</title>
    <item>
      <title><![CDATA[Acme Payments: Payment Operations Analyst]]></title>
      <link>https://weworkremotely.com/jobs/1</link>
      <description><![CDATA[<p>Own <b>settlement</b> &amp; reconciliation. APAC hours.</p>]]></description>
      <pubDate>Mon, 06 Oct 2025 10:00:00 +0000</pubDate>
    </item>
    <item>
      <title>Customer Success Manager</title>
      <link>https://weworkremotely.com/jobs/2</link>
      <description>Work from anywhere.</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_items_reads_cdata_and_plain_fields() {
        let items = parse_items(SAMPLE_FEED);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Acme Payments: Payment Operations Analyst");
        assert_eq!(items[0].link, "https://weworkremotely.com/jobs/1");
        assert!(items[0].description.starts_with("<p>Own"));
        assert_eq!(items[0].pub_date, "Mon, 06 Oct 2025 10:00:00 +0000");
        assert_eq!(items[1].pub_date, "");
    }

    #[test]
    fn test_parse_feed_normalizes_postings() {
        let jobs = parse_feed(SAMPLE_FEED, "WeWorkRemotely", 50, &RegionTable::default());
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.company, "Acme Payments");
        assert_eq!(first.title, "Payment Operations Analyst");
        assert_eq!(first.summary, "Own settlement & reconciliation. APAC hours.");
        assert_eq!(first.source, "WeWorkRemotely");
        assert_eq!(first.location_tags, vec![Region::Asia]);

        let second = &jobs[1];
        assert_eq!(second.company, "Unknown");
        assert_eq!(second.title, "Customer Success Manager");
        assert_eq!(second.location_tags, vec![Region::Global]);
    }

    #[test]
    fn test_parse_feed_respects_max_items() {
        let jobs = parse_feed(SAMPLE_FEED, "RemoteOK", 1, &RegionTable::default());
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_local_focus_limits_urls() {
        let source = FeedSource::new(
            Client::new(),
            "WeWorkRemotely",
            &["https://a", "https://b", "https://c", "https://d"],
            RegionTable::default(),
        )
        .with_local_focus(3);

        let local = FetchContext {
            prioritize_local: true,
            ..FetchContext::default()
        };
        assert_eq!(source.urls_for(&local).len(), 3);
        assert_eq!(source.urls_for(&FetchContext::default()).len(), 4);
    }

    #[test]
    fn test_parse_feed_garbage_is_empty() {
        assert!(parse_feed("<html>nope</html>", "Jobicy", 50, &RegionTable::default()).is_empty());
    }
}
