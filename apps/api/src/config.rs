use anyhow::{Context, Result};

/// Default chat-completion model used for scoring, extraction and cover letters.
pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.5-flash";

/// Application configuration loaded from environment variables.
///
/// Every credential is optional: a missing key degrades the feature that needs it
/// instead of stopping the service.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub jsearch_key: Option<String>,
    pub llm_model: String,
    /// Zeroes every inter-call delay. Only meant for local runs against mocks.
    pub disable_pacing: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            serpapi_key: optional_env("SERPAPI_KEY"),
            jsearch_key: optional_env("JSEARCH_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            disable_pacing: optional_env("DISABLE_PACING")
                .map(|v| parse_flag(&v))
                .transpose()
                .context("DISABLE_PACING must be true/false/1/0")?
                .unwrap_or(false),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
