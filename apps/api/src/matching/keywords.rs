//! Keyword Extractor: what to look for in postings, derived from the profile alone.

use std::sync::LazyLock;

use regex::Regex;

use crate::matching::lexicon::Lexicon;
use crate::models::Profile;

static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\+?\s*(?:years?|yrs?)").unwrap());

const DEFAULT_YEARS: u32 = 3;

/// Working keyword context for one match run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordContext {
    /// Skills, headline terms, industry and the expanded skill words, in insertion order.
    pub primary: Vec<String>,
    /// Headline terms checked against posting titles.
    pub title_words: Vec<String>,
}

/// Best guess of the candidate's years of experience.
///
/// The declared bucket wins; otherwise the headline is read for an explicit
/// "N years" figure, then for level words.
pub fn estimate_years(profile: &Profile) -> u32 {
    if let Some(bucket) = profile.experience {
        return bucket.years();
    }

    let headline = profile.headline.to_lowercase();
    if let Some(years) = YEARS_RE
        .captures(&headline)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
    {
        return years;
    }

    let mentions = |words: &[&str]| words.iter().any(|w| headline.contains(w));
    if mentions(&["intern", "trainee", "fresher"]) {
        0
    } else if mentions(&["junior", "associate"]) {
        1
    } else if mentions(&["senior", "lead", "manager"]) {
        5
    } else if mentions(&["director", "head of", "vp"]) {
        10
    } else {
        DEFAULT_YEARS
    }
}

pub fn extract_keywords(profile: &Profile, lexicon: &Lexicon) -> KeywordContext {
    let skills: Vec<String> = profile
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let headline = profile.headline.to_lowercase();
    let industry = profile.industry.trim().to_lowercase();

    let title_words: Vec<String> = unique(
        headline
            .split_whitespace()
            .filter(|w| w.chars().count() > 2 && !lexicon.is_stop_word(w))
            .map(str::to_string),
    );

    let mut primary: Vec<String> = skills
        .iter()
        .filter(|s| s.chars().count() > 2)
        .cloned()
        .collect();
    primary.extend(title_words.iter().cloned());
    if industry.chars().count() > 2 {
        primary.push(industry);
    }

    let mut expanded = Vec::new();
    for word in skills.iter().flat_map(|s| s.split_whitespace()) {
        let clean: String = word
            .chars()
            .filter(|c| !matches!(c, '.' | ',' | ';' | ':' | '(' | ')' | '/' | '-'))
            .collect();
        if clean.chars().count() > 3 && !lexicon.is_stop_word(&clean) {
            expanded.push(clean);
        }
    }
    let stems: Vec<String> = expanded
        .iter()
        .flat_map(|w| lexicon.stems_of(w))
        .map(|v| v.to_string())
        .collect();
    primary.extend(expanded);
    primary.extend(stems);

    KeywordContext {
        primary: unique(primary),
        title_words,
    }
}

/// Drops repeats, keeping the first occurrence.
fn unique(words: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in words {
        if !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
