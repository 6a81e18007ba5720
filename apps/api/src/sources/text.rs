//! Text cleanup shared by every adapter: HTML stripping, summary truncation,
//! "Company: Role" splitting and region tagging.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Region;
use crate::sources::catalog::REGION_KEYWORDS;

/// Maximum summary length in characters.
pub const SUMMARY_MAX_CHARS: usize = 1000;

const TITLE_SEPARATORS: &[&str] = &[":", " - ", " – ", " | "];

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Removes tags, decodes the common entities and collapses whitespace.
pub fn strip_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let without_tags = TAG_RE.replace_all(text, " ");
    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Truncates to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// HTML description → plain summary capped at [`SUMMARY_MAX_CHARS`].
pub fn clean_summary(html: &str) -> String {
    truncate_chars(&strip_html(html), SUMMARY_MAX_CHARS)
}

/// Splits feed titles like "Acme: Support Engineer" into (company, role).
///
/// The first separator (in [`TITLE_SEPARATORS`] order) that sits neither at the very
/// start nor the very end of the title wins. Otherwise the company is "Unknown".
pub fn split_company_title(title: &str) -> (String, String) {
    let char_len = title.chars().count();
    for sep in TITLE_SEPARATORS {
        if let Some(byte_idx) = title.find(sep) {
            let char_idx = title[..byte_idx].chars().count();
            if char_idx > 2 && char_idx + 3 < char_len {
                let company = title[..byte_idx].trim().to_string();
                let role = title[byte_idx + sep.len()..].trim().to_string();
                return (company, role);
            }
        }
    }
    ("Unknown".to_string(), title.to_string())
}

/// Region lookup table used to tag postings.
#[derive(Debug, Clone, Copy)]
pub struct RegionTable {
    pub regions: &'static [(Region, &'static [&'static str])],
}

impl Default for RegionTable {
    fn default() -> Self {
        Self {
            regions: REGION_KEYWORDS,
        }
    }
}

impl RegionTable {
    /// Every region with at least one keyword in `text`, sorted. Defaults to `[Global]`.
    pub fn tag(&self, text: &str) -> Vec<Region> {
        let lower = text.to_lowercase();
        let tags: BTreeSet<Region> = self
            .regions
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(region, _)| *region)
            .collect();
        if tags.is_empty() {
            vec![Region::Global]
        } else {
            tags.into_iter().collect()
        }
    }
}
