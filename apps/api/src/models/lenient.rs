//! Defensive field deserializers for JSON produced by clients and by the LLM.
//!
//! Missing fields fall back to their default, scalars of the wrong type are coerced
//! to strings, and anything that cannot be coerced is dropped.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Search terms kept from any profile.
pub const MAX_SEARCH_TERMS: usize = 5;

/// String field: numbers and booleans are stringified, everything else becomes "".
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_scalar).unwrap_or_default())
}

/// Skill list normalized to a sorted set of lowercase strings.
pub fn skill_set<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(normalize_skills(coerce_list(value)))
}

/// Search terms: non-empty strings only, capped at [`MAX_SEARCH_TERMS`].
pub fn search_terms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let mut terms = coerce_list(value);
    terms.truncate(MAX_SEARCH_TERMS);
    Ok(terms)
}

/// Trims, lowercases, drops empties, deduplicates and sorts.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(coerce_scalar)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}
