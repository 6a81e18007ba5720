//! Resume parsing: PDF bytes → text → profile fields via the LLM.

use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{parse_json_reply, CallOptions, LlmClient, LlmError};
use crate::models::{lenient, Profile};
use crate::resume::prompts::PROFILE_EXTRACT_PROMPT_TEMPLATE;
use crate::sources::text::truncate_chars;

/// Resume characters sent to the LLM.
pub const RESUME_TEXT_CHARS: usize = 6000;
const EXTRACT_MAX_TOKENS: u32 = 600;
const DEFAULT_NAME: &str = "Candidate";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not extract text from PDF")]
    EmptyText,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl From<ResumeError> for AppError {
    fn from(e: ResumeError) -> Self {
        match e {
            ResumeError::Pdf(_) | ResumeError::EmptyText => {
                AppError::UnprocessableEntity(e.to_string())
            }
            ResumeError::Llm(e) => e.into(),
        }
    }
}

/// Profile fields read from the LLM reply. Every field is optional and coerced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedProfile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub headline: String,
    #[serde(default, deserialize_with = "lenient::skill_set")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient::search_terms")]
    pub search_terms: Vec<String>,
}

impl ExtractedProfile {
    /// Fills the profile fields a resume can tell us about; the rest stay default.
    pub fn into_profile(self) -> Profile {
        Profile {
            name: if self.name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                self.name
            },
            headline: self.headline,
            skills: self.skills,
            industry: self.industry,
            search_terms: self.search_terms,
            ..Profile::default()
        }
    }
}

/// Extracts text on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, ResumeError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| ResumeError::Pdf(e.to_string()))?
        .map_err(|e| ResumeError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ResumeError::EmptyText);
    }
    debug!("Extracted {} characters of resume text", text.len());
    Ok(text)
}

pub fn extraction_prompt(resume_text: &str) -> String {
    render(
        PROFILE_EXTRACT_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("resume_text", &truncate_chars(resume_text, RESUME_TEXT_CHARS)),
        ],
    )
}

/// Parses the LLM reply. Only a JSON object is accepted; its fields are coerced.
pub fn parse_extraction(reply: &str) -> Result<Profile, LlmError> {
    let extracted: ExtractedProfile = parse_json_reply(reply)?;
    Ok(extracted.into_profile())
}

pub async fn extract_profile(llm: &LlmClient, resume_text: &str) -> Result<Profile, ResumeError> {
    let reply = llm
        .call_text(
            &extraction_prompt(resume_text),
            CallOptions::precise(EXTRACT_MAX_TOKENS),
        )
        .await?;
    let profile = parse_extraction(&reply)?;
    info!(
        "Extracted profile: {} skills, {} search terms",
        profile.skills.len(),
        profile.search_terms.len()
    );
    Ok(profile)
}

/// PDF bytes to profile.
pub async fn parse_resume(llm: &LlmClient, pdf: Bytes) -> Result<Profile, ResumeError> {
    let text = extract_pdf_text(pdf).await?;
    extract_profile(llm, &text).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extraction_normalizes_fields() {
        let reply = r#"```json
{
  "name": "Asha Rao",
  "headline": "Payments Operations Analyst",
  "skills": ["UPI Services", " merchant onboarding ", "upi services", 42, null],
  "industry": "fintech",
  "search_terms": ["Payments Analyst", "", "Ops Analyst", "Settlement Analyst",
                   "Reconciliation Analyst", "Merchant Ops", "Risk Analyst"]
}
```"#;
        let profile = parse_extraction(reply).unwrap();

        assert_eq!(profile.name, "Asha Rao");
        assert_eq!(profile.skills, vec!["42", "merchant onboarding", "upi services"]);
        assert_eq!(profile.search_terms.len(), 5);
        assert_eq!(profile.search_terms[1], "Ops Analyst");
        assert_eq!(profile.experience, None);
        assert_eq!(profile.country, "");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let profile = parse_extraction(r#"{"skills": "fintech"}"#).unwrap();
        assert_eq!(profile.name, "Candidate");
        assert_eq!(profile.headline, "");
        assert_eq!(profile.skills, vec!["fintech"]);
        assert!(profile.search_terms.is_empty());
    }

    #[test]
    fn test_wrong_types_are_coerced_or_dropped() {
        let profile =
            parse_extraction(r#"{"name": {"first": "A"}, "headline": 7, "skills": {"a": 1}}"#)
                .unwrap();
        assert_eq!(profile.name, "Candidate");
        assert_eq!(profile.headline, "7");
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_non_json_reply_is_an_error() {
        assert!(parse_extraction("I could not read the resume").is_err());
    }

    #[test]
    fn test_prompt_truncates_resume_text() {
        let prompt = extraction_prompt(&"a".repeat(RESUME_TEXT_CHARS + 500));
        assert!(prompt.contains(&"a".repeat(RESUME_TEXT_CHARS)));
        assert!(!prompt.contains(&"a".repeat(RESUME_TEXT_CHARS + 1)));
        assert!(prompt.contains("Return ONLY valid JSON."));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_rejected() {
        let result = extract_pdf_text(Bytes::from_static(b"not a pdf")).await;
        assert!(matches!(result, Err(ResumeError::Pdf(_))));
    }
}
