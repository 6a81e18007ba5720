// LLM prompt constants for batch scoring.

use crate::llm_client::prompts::render;
use crate::models::{JobPosting, Profile};
use crate::sources::text::truncate_chars;

const PROMPT_SKILLS: usize = 15;
const PROMPT_SUMMARY_CHARS: usize = 300;

/// Batch scoring template. Replace `{count}`, `{headline}`, `{industry_line}`, `{skills}`,
/// `{years}`, `{industry}` and `{jobs}` before sending.
pub const BATCH_SCORE_PROMPT_TEMPLATE: &str = r#"You are a job matching expert. Score these {count} jobs for this candidate.

Candidate profile:
- Headline: {headline}{industry_line}
- Skills: {skills}
- Experience: ~{years} years

Jobs to score:
{jobs}

SCORING RULES (0-100):
- 80-100: Strong match. Same industry, relevant title, skills overlap significantly
- 60-79: Good match. Related role, some skills overlap
- 40-59: Weak match. Tangentially related
- 0-39: No match. Completely different field

IMPORTANT:
- Consider the candidate's INDUSTRY ({industry})
- Score based on whether the candidate would ACTUALLY apply and be considered

Return ONLY a JSON array of {count} integers, nothing else.
Example: [75, 60, 45, 90]

Scores:"#;

fn job_block(index: usize, job: &JobPosting) -> String {
    let or_unknown = |s: &str| if s.is_empty() { "?".to_string() } else { s.to_string() };
    format!(
        "JOB {}:\nTitle: {}\nCompany: {}\nSummary: {}",
        index + 1,
        or_unknown(&job.title),
        or_unknown(&job.company),
        truncate_chars(&job.summary, PROMPT_SUMMARY_CHARS)
    )
}

pub fn batch_score_prompt(batch: &[&JobPosting], profile: &Profile, years: u32) -> String {
    let skills: Vec<&str> = profile
        .skills
        .iter()
        .take(PROMPT_SKILLS)
        .map(String::as_str)
        .collect();
    let headline = match profile.headline.trim() {
        "" => "Professional",
        h => h,
    };
    let industry = profile.industry.trim();
    let industry_line = if industry.is_empty() {
        String::new()
    } else {
        format!("\n- Industry: {industry}")
    };
    let jobs = batch
        .iter()
        .enumerate()
        .map(|(i, job)| job_block(i, job))
        .collect::<Vec<_>>()
        .join("\n\n");

    render(
        BATCH_SCORE_PROMPT_TEMPLATE,
        &[
            ("count", &batch.len().to_string()),
            ("headline", headline),
            ("industry_line", &industry_line),
            ("skills", &skills.join(", ")),
            ("years", &years.to_string()),
            ("industry", if industry.is_empty() { "general" } else { industry }),
            ("jobs", &jobs),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_jobs_in_order() {
        let first = JobPosting {
            title: "Payments Analyst".into(),
            company: "Razorpay".into(),
            summary: "x".repeat(400),
            ..JobPosting::default()
        };
        let second = JobPosting::default();
        let profile = Profile {
            skills: vec!["fintech".into(), "payment operations".into()],
            industry: "Fintech".into(),
            ..Profile::default()
        };
        let prompt = batch_score_prompt(&[&first, &second], &profile, 4);

        assert!(prompt.contains("Score these 2 jobs"));
        assert!(prompt.contains("- Headline: Professional\n- Industry: Fintech"));
        assert!(prompt.contains("- Skills: fintech, payment operations"));
        assert!(prompt.contains("~4 years"));
        assert!(prompt.contains("JOB 1:\nTitle: Payments Analyst\nCompany: Razorpay"));
        assert!(prompt.contains("JOB 2:\nTitle: ?\nCompany: ?"));
        assert!(!prompt.contains(&"x".repeat(301)));
        assert!(prompt.contains("JSON array of 2 integers"));
    }

    #[test]
    fn test_prompt_without_industry() {
        let prompt = batch_score_prompt(&[], &Profile::default(), 3);
        assert!(prompt.contains("INDUSTRY (general)"));
        assert!(!prompt.contains("- Industry:"));
    }

    #[test]
    fn test_braces_in_headline_stay_literal() {
        let job = JobPosting {
            title: "Payments Analyst".into(),
            ..JobPosting::default()
        };
        let profile = Profile {
            headline: "{jobs} {industry}".into(),
            ..Profile::default()
        };
        let prompt = batch_score_prompt(&[&job], &profile, 3);

        assert!(prompt.contains("- Headline: {jobs} {industry}"));
        assert_eq!(prompt.matches("Title: Payments Analyst").count(), 1);
    }
}
