//! Query Builder: derives search queries and a location hint from a profile.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::Profile;

pub const MAX_QUERIES: usize = 10;
const MAX_EXPLICIT_TERMS: usize = 5;
/// Headline and industry are only added while fewer than this many queries exist.
const DERIVED_QUERY_BUDGET: usize = 8;
const SKILL_QUERIES: usize = 2;
const MAX_SKILL_QUERY_WORDS: usize = 3;

/// Queries in priority order plus an optional location for location-aware APIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchPlan {
    pub queries: Vec<String>,
    pub location: Option<String>,
}

/// Builds at most [`MAX_QUERIES`] unique (case-insensitive), non-empty queries.
pub fn build_queries(profile: &Profile) -> SearchPlan {
    let mut candidates: Vec<String> = profile
        .search_terms
        .iter()
        .take(MAX_EXPLICIT_TERMS)
        .map(|t| t.trim().to_string())
        .collect();

    let headline = profile.headline.trim();
    if !headline.is_empty() && candidates.len() < DERIVED_QUERY_BUDGET {
        candidates.push(headline.to_string());
    }

    let industry = profile.industry.trim();
    if !industry.is_empty() && candidates.len() < DERIVED_QUERY_BUDGET {
        candidates.push(format!("{industry} jobs"));
    }

    for skill in profile.skills.iter().take(SKILL_QUERIES) {
        let skill = skill.trim();
        let words = skill.split_whitespace().count();
        if candidates.len() < MAX_QUERIES && words > 0 && words <= MAX_SKILL_QUERY_WORDS {
            candidates.push(format!("{skill} specialist"));
        }
    }

    let mut seen = HashSet::new();
    let queries = candidates
        .into_iter()
        .filter(|q| !q.is_empty() && seen.insert(q.to_lowercase()))
        .take(MAX_QUERIES)
        .collect();

    SearchPlan {
        queries,
        location: location_hint(profile),
    }
}

/// `None` for remote-only candidates; otherwise the region, falling back to the country.
pub fn location_hint(profile: &Profile) -> Option<String> {
    if profile.is_remote_only() {
        return None;
    }
    profile
        .region()
        .map(strip_brackets)
        .filter(|r| !r.is_empty())
        .or_else(|| Some(strip_brackets(&profile.country)).filter(|c| !c.is_empty()))
}

/// "Karnataka (Bangalore)" → "Karnataka Bangalore". The city stays in the hint.
fn strip_brackets(text: &str) -> String {
    text.replace(['(', ')'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
