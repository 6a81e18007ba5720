use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::lenient;

/// Countries that mean "no location preference".
pub const REMOTE_COUNTRIES: &[&str] = &["remote only", "remote", "global", ""];

/// Self-reported experience range, as offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    ZeroToOne,
    OneToThree,
    ThreeToSix,
    SixToTen,
    TenPlus,
}

impl ExperienceBucket {
    /// Representative number of years used by the scorer.
    pub fn years(self) -> u32 {
        match self {
            ExperienceBucket::ZeroToOne => 0,
            ExperienceBucket::OneToThree => 2,
            ExperienceBucket::ThreeToSix => 4,
            ExperienceBucket::SixToTen => 7,
            ExperienceBucket::TenPlus => 12,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExperienceBucket::ZeroToOne => "0–1 years",
            ExperienceBucket::OneToThree => "1–3 years",
            ExperienceBucket::ThreeToSix => "3–6 years",
            ExperienceBucket::SixToTen => "6–10 years",
            ExperienceBucket::TenPlus => "10+ years",
        }
    }

    /// Accepts any JSON value; unknown labels and non-strings become `None`.
    fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = lenient::string(deserializer)?;
        Ok(raw.parse().ok())
    }
}

impl fmt::Display for ExperienceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperienceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The form uses an en-dash; hand-typed input usually has a hyphen.
        let normalized = s.trim().replace('–', "-").to_lowercase();
        match normalized.as_str() {
            "0-1 years" => Ok(ExperienceBucket::ZeroToOne),
            "1-3 years" => Ok(ExperienceBucket::OneToThree),
            "3-6 years" => Ok(ExperienceBucket::ThreeToSix),
            "6-10 years" => Ok(ExperienceBucket::SixToTen),
            "10+ years" => Ok(ExperienceBucket::TenPlus),
            _ => Err(format!("unknown experience range '{s}'")),
        }
    }
}

impl Serialize for ExperienceBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Candidate profile supplied by the UI. Immutable input to the matching pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub headline: String,
    #[serde(default, deserialize_with = "ExperienceBucket::deserialize_lenient")]
    pub experience: Option<ExperienceBucket>,
    /// Lowercase, deduplicated, sorted.
    #[serde(default, deserialize_with = "lenient::skill_set")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient::search_terms")]
    pub search_terms: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: String,
}

impl Profile {
    /// True when the country is one of the "anywhere" sentinels.
    pub fn is_remote_only(&self) -> bool {
        let country = self.country.trim().to_lowercase();
        REMOTE_COUNTRIES.contains(&country.as_str())
    }

    /// The state/region, unless it is empty or the "Any" placeholder.
    pub fn region(&self) -> Option<&str> {
        let state = self.state.trim();
        (!state.is_empty() && !state.eq_ignore_ascii_case("any")).then_some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_parses_both_dash_styles() {
        assert_eq!("3–6 years".parse(), Ok(ExperienceBucket::ThreeToSix));
        assert_eq!("3-6 years".parse(), Ok(ExperienceBucket::ThreeToSix));
        assert_eq!("10+ Years".parse(), Ok(ExperienceBucket::TenPlus));
        assert!("a while".parse::<ExperienceBucket>().is_err());
    }

    #[test]
    fn test_bucket_years() {
        assert_eq!(ExperienceBucket::ZeroToOne.years(), 0);
        assert_eq!(ExperienceBucket::OneToThree.years(), 2);
        assert_eq!(ExperienceBucket::SixToTen.years(), 7);
    }

    #[test]
    fn test_profile_deserializes_loose_json() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "name": "Asha",
                "experience": "1-3 years",
                "skills": ["Payment Operations", "fintech", "FINTECH"],
                "search_terms": ["Payments Analyst", 7],
                "country": "India",
                "state": "Any"
            }"#,
        )
        .unwrap();
        assert_eq!(profile.experience, Some(ExperienceBucket::OneToThree));
        assert_eq!(profile.skills, vec!["fintech", "payment operations"]);
        assert_eq!(profile.search_terms, vec!["Payments Analyst", "7"]);
        assert_eq!(profile.headline, "");
        assert!(!profile.is_remote_only());
        assert_eq!(profile.region(), None);
    }

    #[test]
    fn test_unknown_experience_is_none() {
        let profile: Profile = serde_json::from_str(r#"{"experience": 5}"#).unwrap();
        assert_eq!(profile.experience, None);
    }

    #[test]
    fn test_remote_sentinels() {
        for country in ["Remote Only", "remote", "GLOBAL", ""] {
            let profile = Profile {
                country: country.to_string(),
                ..Profile::default()
            };
            assert!(profile.is_remote_only(), "{country:?} should be remote");
        }
    }

    #[test]
    fn test_experience_serializes_with_form_label() {
        let json = serde_json::to_string(&ExperienceBucket::ThreeToSix).unwrap();
        assert_eq!(json, "\"3–6 years\"");
    }
}
