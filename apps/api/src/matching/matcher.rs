use serde::Serialize;

use crate::aggregation::ProgressSink;
use crate::matching::assembler::{
    apply_boosts, combine_scores, rank_and_diversify, select_matches, ScoredJob,
};
use crate::matching::keywords::{estimate_years, extract_keywords, KeywordContext};
use crate::matching::lexicon::Lexicon;
use crate::matching::local_scorer::{is_non_english, score_locally, title_seniority, Seniority};
use crate::matching::locality::LocalityAliases;
use crate::matching::oracle::OracleScorer;
use crate::models::{JobPosting, MatchedJob, Profile};

/// Postings below this local score are dropped before any ranking.
pub const MATCH_THRESHOLD: u8 = 25;
/// Candidates below this many years never see leadership titles.
pub const SENIOR_FILTER_YEARS: u32 = 3;
pub const LOCALITY_BOOST: u8 = 20;
pub const MAX_LLM_CANDIDATES: usize = 60;
/// Cut-off for heuristic-only ranking when no oracle is configured.
pub const LOCAL_ONLY_THRESHOLD: u8 = 60;

/// Why postings left the local phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub non_english: usize,
    pub too_senior: usize,
    pub low_score: usize,
}

/// Everything derived from the profile that the local phase needs.
struct MatchContext {
    years: u32,
    keywords: KeywordContext,
    aliases: LocalityAliases,
}

/// Scores and ranks postings for one profile.
#[derive(Clone)]
pub struct JobMatcher {
    lexicon: Lexicon,
    oracle: Option<OracleScorer>,
}

impl JobMatcher {
    /// `None` means heuristic-only ranking.
    pub fn new(oracle: Option<OracleScorer>) -> Self {
        Self {
            lexicon: Lexicon::default(),
            oracle,
        }
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    fn context(&self, profile: &Profile) -> MatchContext {
        MatchContext {
            years: estimate_years(profile),
            keywords: extract_keywords(profile, &self.lexicon),
            aliases: LocalityAliases::for_profile(profile, &self.lexicon),
        }
    }

    /// Local phase: language and seniority filters, heuristic score, locality boost.
    /// Survivors come back sorted by boosted score, highest first.
    #[cfg(test)]
    pub fn shortlist(
        &self,
        jobs: &[JobPosting],
        profile: &Profile,
    ) -> (Vec<ScoredJob>, FilterStats) {
        let ctx = self.context(profile);
        self.shortlist_with(jobs, &ctx)
    }

    fn shortlist_with(
        &self,
        jobs: &[JobPosting],
        ctx: &MatchContext,
    ) -> (Vec<ScoredJob>, FilterStats) {
        let mut stats = FilterStats::default();
        let mut scored = Vec::new();

        for job in jobs {
            if is_non_english(job, &self.lexicon) {
                stats.non_english += 1;
                continue;
            }
            if ctx.years < SENIOR_FILTER_YEARS
                && title_seniority(&job.title, &self.lexicon) == Seniority::Senior
            {
                stats.too_senior += 1;
                continue;
            }

            let local = score_locally(job, &ctx.keywords, ctx.years, &self.lexicon);
            if local.score < MATCH_THRESHOLD {
                stats.low_score += 1;
                continue;
            }

            let is_local = ctx.aliases.is_local(job, &self.lexicon);
            let boosted_score = if is_local {
                local.score.saturating_add(LOCALITY_BOOST).min(100)
            } else {
                local.score
            };
            scored.push(ScoredJob {
                posting: job.clone(),
                local_score: local.score,
                boosted_score,
                is_local,
                oracle_score: None,
                match_score: boosted_score,
            });
        }

        scored.sort_by(|a, b| b.boosted_score.cmp(&a.boosted_score));
        (scored, stats)
    }

    /// Full match: local phase, oracle re-score of the top candidates, selection.
    ///
    /// An empty result is a normal outcome.
    pub async fn match_jobs(
        &self,
        jobs: &[JobPosting],
        profile: &Profile,
        progress: &mut dyn ProgressSink,
    ) -> Vec<MatchedJob> {
        let ctx = self.context(profile);
        progress.report(&format!(
            "Scoring {} jobs locally ({} keywords)...",
            jobs.len(),
            ctx.keywords.primary.len()
        ));

        let (mut shortlist, stats) = self.shortlist_with(jobs, &ctx);
        progress.report(&format!(
            "Local filter: {} passed ({} filtered, {} too senior, {} non-English)",
            shortlist.len(),
            stats.low_score,
            stats.too_senior,
            stats.non_english
        ));
        if shortlist.is_empty() {
            return Vec::new();
        }
        shortlist.truncate(MAX_LLM_CANDIDATES);

        let Some(scorer) = &self.oracle else {
            progress.report("No API key, using local scores only");
            let admitted: Vec<ScoredJob> = shortlist
                .into_iter()
                .filter(|j| j.boosted_score >= LOCAL_ONLY_THRESHOLD)
                .collect();
            let matches = rank_and_diversify(admitted);
            progress.report(&format!("{} matches (local scores)", matches.len()));
            return matches;
        };

        progress.report(&format!(
            "Sending top {} to LLM for scoring...",
            shortlist.len()
        ));
        let oracle_scores = {
            let refs: Vec<&JobPosting> = shortlist.iter().map(|j| &j.posting).collect();
            scorer
                .score_all(&refs, profile, ctx.years, |number, size| {
                    progress.report(&format!("Batch {number}: scoring {size} jobs..."));
                })
                .await
        };

        for (job, oracle_score) in shortlist.iter_mut().zip(oracle_scores) {
            let combined = combine_scores(job.boosted_score, oracle_score);
            job.oracle_score = Some(oracle_score);
            job.match_score = apply_boosts(combined, &job.posting, &ctx.aliases, &self.lexicon);
        }

        match select_matches(shortlist) {
            Some((threshold, matches)) => {
                progress.report(&format!(
                    "{} matches (threshold {}%)",
                    matches.len(),
                    threshold
                ));
                matches
            }
            None => {
                progress.report("No strong matches found");
                Vec::new()
            }
        }
    }
}
