//! Cover letters: one short LLM-drafted letter per posting.

pub mod handlers;
pub mod prompts;

use tracing::info;

use crate::cover_letter::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::llm_client::prompts::render;
use crate::llm_client::{CallOptions, LlmClient, LlmError};
use crate::models::{JobPosting, Profile};
use crate::sources::text::truncate_chars;

const PROMPT_SKILLS: usize = 20;
const PROMPT_DESCRIPTION_CHARS: usize = 1500;
const LETTER_MAX_TOKENS: u32 = 250;
const DEFAULT_NAME: &str = "Candidate";
const DEFAULT_HEADLINE: &str = "Professional";

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        v => v,
    }
}

pub fn cover_letter_prompt(job: &JobPosting, profile: &Profile) -> String {
    let skills: Vec<&str> = profile
        .skills
        .iter()
        .take(PROMPT_SKILLS)
        .map(String::as_str)
        .collect();
    render(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("name", or_default(&profile.name, DEFAULT_NAME)),
            ("headline", or_default(&profile.headline, DEFAULT_HEADLINE)),
            ("skills", &skills.join(", ")),
            ("title", or_default(&job.title, "?")),
            ("company", or_default(&job.company, "?")),
            (
                "description",
                &truncate_chars(&job.summary, PROMPT_DESCRIPTION_CHARS),
            ),
        ],
    )
}

/// Swaps leftover `[Your Name]` and `[Company Name]` placeholders for real values.
pub fn fill_placeholders(letter: &str, job: &JobPosting, profile: &Profile) -> String {
    letter
        .trim()
        .replace("[Your Name]", or_default(&profile.name, DEFAULT_NAME))
        .replace("[Company Name]", job.company.trim())
}

pub async fn write_cover_letter(
    llm: &LlmClient,
    job: &JobPosting,
    profile: &Profile,
) -> Result<String, LlmError> {
    let reply = llm
        .call_text(
            &cover_letter_prompt(job, profile),
            CallOptions::creative(LETTER_MAX_TOKENS),
        )
        .await?;
    info!("Cover letter drafted for {} at {}", job.title, job.company);
    Ok(fill_placeholders(&reply, job, profile))
}
