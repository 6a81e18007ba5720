//! Local Scorer: keyword heuristic, zero external calls.

use crate::matching::keywords::KeywordContext;
use crate::matching::lexicon::Lexicon;
use crate::models::JobPosting;

/// Keywords reported back per job.
const MAX_MATCHED_KEYWORDS: usize = 5;

/// Seniority level implied by a posting title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Senior,
    Mid,
    Open,
}

pub fn title_seniority(title: &str, lexicon: &Lexicon) -> Seniority {
    let title = title.to_lowercase();
    if lexicon.senior_markers.iter().any(|m| title.contains(m)) {
        Seniority::Senior
    } else if lexicon.mid_markers.iter().any(|m| title.contains(m)) {
        Seniority::Mid
    } else {
        Seniority::Open
    }
}

pub fn is_non_english(job: &JobPosting, lexicon: &Lexicon) -> bool {
    let text = job.search_text();
    lexicon.non_english.iter().any(|i| text.contains(i))
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalScore {
    /// 0–100.
    pub score: u8,
    /// First few keywords found, in keyword order.
    pub matched: Vec<String>,
}

/// Points for one keyword hit. Longer keywords are more specific.
fn keyword_weight(keyword: &str) -> u32 {
    match keyword.chars().count() {
        n if n > 10 => 12,
        n if n > 6 => 8,
        _ => 5,
    }
}

/// Scores a posting against the keyword context.
///
/// Keyword hits are searched in "title summary"; title words only in the title.
pub fn score_locally(
    job: &JobPosting,
    keywords: &KeywordContext,
    candidate_years: u32,
    lexicon: &Lexicon,
) -> LocalScore {
    let title = job.title.to_lowercase();
    let text = job.search_text();

    let mut score = 0u32;
    let mut matched = Vec::new();
    for keyword in keywords.primary.iter().filter(|k| text.contains(k.as_str())) {
        score += keyword_weight(keyword);
        matched.push(keyword.clone());
    }

    let title_hits = keywords
        .title_words
        .iter()
        .filter(|w| title.contains(w.as_str()))
        .count();
    score += match title_hits {
        0 => 0,
        1 => 4,
        _ => 8,
    };

    score += match title_seniority(&title, lexicon) {
        Seniority::Open => 5,
        Seniority::Mid if candidate_years >= 2 => 3,
        _ => 0,
    };

    matched.truncate(MAX_MATCHED_KEYWORDS);
    LocalScore {
        score: score.min(100) as u8,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, summary: &str) -> JobPosting {
        JobPosting {
            title: title.into(),
            summary: summary.into(),
            ..JobPosting::default()
        }
    }

    fn keywords(primary: &[&str], title_words: &[&str]) -> KeywordContext {
        KeywordContext {
            primary: primary.iter().map(|s| s.to_string()).collect(),
            title_words: title_words.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_title_seniority() {
        let lex = Lexicon::default();
        assert_eq!(title_seniority("Payments Operations Lead", &lex), Seniority::Senior);
        assert_eq!(title_seniority("VP of Sales", &lex), Seniority::Senior);
        assert_eq!(title_seniority("Senior Analyst", &lex), Seniority::Mid);
        assert_eq!(title_seniority("Sr. Analyst", &lex), Seniority::Mid);
        assert_eq!(title_seniority("Payments Ops Associate", &lex), Seniority::Open);
    }

    #[test]
    fn test_non_english_detection() {
        let lex = Lexicon::default();
        assert!(is_non_english(&job("Analista", "Se requiere español fluido"), &lex));
        assert!(!is_non_english(&job("Analyst", "English only"), &lex));
    }

    #[test]
    fn test_keyword_weights_by_length() {
        let lex = Lexicon::default();
        // "ops" 5, "payment" 8, "reconciliation" 12, open title +5
        let kw = keywords(&["ops", "payment", "reconciliation"], &[]);
        let result = score_locally(&job("Ops Analyst", "payment reconciliation"), &kw, 3, &lex);
        assert_eq!(result.score, 30);
        assert_eq!(result.matched, vec!["ops", "payment", "reconciliation"]);
    }

    #[test]
    fn test_title_word_bonus() {
        let lex = Lexicon::default();
        let kw = keywords(&[], &["payments", "analyst"]);
        assert_eq!(score_locally(&job("Payments Analyst", ""), &kw, 3, &lex).score, 13);
        assert_eq!(score_locally(&job("Payments Clerk", ""), &kw, 3, &lex).score, 9);
        // title words are not searched in the summary
        assert_eq!(score_locally(&job("Clerk", "payments analyst"), &kw, 3, &lex).score, 5);
    }

    #[test]
    fn test_mid_bonus_needs_two_years() {
        let lex = Lexicon::default();
        let kw = keywords(&[], &[]);
        assert_eq!(score_locally(&job("Senior Analyst", ""), &kw, 2, &lex).score, 3);
        assert_eq!(score_locally(&job("Senior Analyst", ""), &kw, 1, &lex).score, 0);
        assert_eq!(score_locally(&job("Head of Ops", ""), &kw, 10, &lex).score, 0);
    }

    #[test]
    fn test_score_capped_at_100() {
        let lex = Lexicon::default();
        let primary: Vec<String> = (0..20).map(|i| format!("longkeyword{i:02}")).collect();
        let summary = primary.join(" ");
        let kw = KeywordContext {
            primary,
            title_words: vec![],
        };
        let result = score_locally(&job("Analyst", &summary), &kw, 3, &lex);
        assert_eq!(result.score, 100);
        assert_eq!(result.matched.len(), 5);
    }

    #[test]
    fn test_adding_matching_keyword_never_lowers_score() {
        let lex = Lexicon::default();
        let posting = job("Payments Ops Associate", "fintech payouts");
        let base = score_locally(&posting, &keywords(&["fintech"], &[]), 3, &lex).score;
        let more = score_locally(&posting, &keywords(&["fintech", "payouts"], &[]), 3, &lex).score;
        assert!(more >= base);
    }
}
