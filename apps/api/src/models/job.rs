use serde::{Deserialize, Serialize};

/// Coarse region label inferred from posting text.
///
/// Variant order is alphabetical so sorted tag lists read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Global,
}

/// A single job listing normalized from any source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    /// Plain text, at most 1000 characters.
    pub summary: String,
    /// Dedup key when non-empty.
    pub apply_url: String,
    pub source: String,
    pub date_posted: String,
    pub location: String,
    pub location_tags: Vec<Region>,
}

impl JobPosting {
    /// Lowercased "title summary" text used by every keyword check.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }
}

/// The public result shape: the posting plus its single exposed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedJob {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub match_score: u8,
}
