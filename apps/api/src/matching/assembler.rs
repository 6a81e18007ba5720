//! Result Assembler: blends scores, applies boosts, picks and diversifies the final list.

use std::collections::HashMap;

use crate::matching::lexicon::Lexicon;
use crate::matching::locality::LocalityAliases;
use crate::models::{JobPosting, MatchedJob};

pub const MAX_MATCHES: usize = 20;
pub const MAX_PER_COMPANY: usize = 3;
/// Tried in order; the first that admits at least one posting is used.
pub const SELECTION_THRESHOLDS: [u8; 3] = [70, 65, 60];
/// Flat bonus for a priority source or a location mention.
const BOOST: u8 = 8;
const LOCAL_WEIGHT: f64 = 0.4;
const ORACLE_WEIGHT: f64 = 0.6;

/// A posting with its pipeline-internal scores. Never leaves the matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredJob {
    pub posting: JobPosting,
    /// Raw heuristic score.
    pub local_score: u8,
    /// Heuristic score after the locality boost; ranks the oracle shortlist.
    pub boosted_score: u8,
    pub is_local: bool,
    pub oracle_score: Option<u8>,
    pub match_score: u8,
}

impl ScoredJob {
    pub fn into_matched(self) -> MatchedJob {
        MatchedJob {
            posting: self.posting,
            match_score: self.match_score,
        }
    }
}

/// round(local × 0.4 + oracle × 0.6), within 0–100.
pub fn combine_scores(local: u8, oracle: u8) -> u8 {
    let blended = f64::from(local) * LOCAL_WEIGHT + f64::from(oracle) * ORACLE_WEIGHT;
    blended.round().clamp(0.0, 100.0) as u8
}

/// Priority-source and location boosts, each capped at 100.
pub fn apply_boosts(
    score: u8,
    job: &JobPosting,
    aliases: &LocalityAliases,
    lexicon: &Lexicon,
) -> u8 {
    let mut score = score;
    let source = job.source.to_lowercase();
    if lexicon.priority_sources.iter().any(|s| source.contains(s)) {
        score = score.saturating_add(BOOST).min(100);
    }
    if aliases.mentioned_by(job) {
        score = score.saturating_add(BOOST).min(100);
    }
    score
}

/// Company key for the diversity cap. Missing companies count as "unknown".
fn company_key(job: &JobPosting) -> String {
    match job.company.trim() {
        "" => "unknown".to_string(),
        company => company.to_lowercase(),
    }
}

/// Keeps at most [`MAX_PER_COMPANY`] postings per company, preserving order.
pub fn enforce_company_diversity(jobs: Vec<ScoredJob>) -> Vec<ScoredJob> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    jobs.into_iter()
        .filter(|job| {
            let count = counts.entry(company_key(&job.posting)).or_insert(0);
            *count += 1;
            *count <= MAX_PER_COMPANY
        })
        .collect()
}

/// Sorts by descending match score (stable), diversifies and truncates.
pub fn rank_and_diversify(mut jobs: Vec<ScoredJob>) -> Vec<MatchedJob> {
    jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    enforce_company_diversity(jobs)
        .into_iter()
        .take(MAX_MATCHES)
        .map(ScoredJob::into_matched)
        .collect()
}

/// Applies the first threshold that admits anything. Returns the threshold used and
/// the final list, or `None` when no threshold admits a posting.
pub fn select_matches(jobs: Vec<ScoredJob>) -> Option<(u8, Vec<MatchedJob>)> {
    let threshold = SELECTION_THRESHOLDS
        .into_iter()
        .find(|t| jobs.iter().any(|j| j.match_score >= *t))?;
    let admitted = jobs
        .into_iter()
        .filter(|j| j.match_score >= threshold)
        .collect();
    Some((threshold, rank_and_diversify(admitted)))
}
