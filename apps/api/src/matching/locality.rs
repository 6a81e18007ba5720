use std::sync::LazyLock;

use regex::Regex;

use crate::matching::lexicon::Lexicon;
use crate::models::{JobPosting, Profile};

static CITY_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

/// Lowercase place names that mark a posting as near the candidate.
///
/// Built from the country, the cities listed in the state's parentheses
/// ("Karnataka (Bangalore/Mysore)") and the lexicon's city list for the country.
/// Empty for remote-only candidates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalityAliases {
    aliases: Vec<String>,
}

impl LocalityAliases {
    pub fn for_profile(profile: &Profile, lexicon: &Lexicon) -> Self {
        if profile.is_remote_only() {
            return Self::default();
        }

        let country = profile.country.trim().to_lowercase();
        let mut aliases = vec![country.clone()];

        if let Some(cities) = profile
            .region()
            .and_then(|state| CITY_LIST_RE.captures(state))
            .and_then(|c| c.get(1))
        {
            aliases.extend(
                cities
                    .as_str()
                    .split('/')
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty()),
            );
        }

        aliases.extend(lexicon.cities_of(&country).iter().map(|c| c.to_string()));
        Self { aliases }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.aliases
    }

    fn found_in(&self, text: &str) -> bool {
        self.aliases.iter().any(|a| text.contains(a.as_str()))
    }

    /// Title, summary or location mentions one of the aliases.
    pub fn mentioned_by(&self, job: &JobPosting) -> bool {
        let text = format!("{} {} {}", job.title, job.summary, job.location).to_lowercase();
        self.found_in(&text)
    }

    /// Local by text (company and source included) or because it came from a local board.
    pub fn is_local(&self, job: &JobPosting, lexicon: &Lexicon) -> bool {
        let text = format!(
            "{} {} {} {} {}",
            job.title, job.summary, job.company, job.source, job.location
        )
        .to_lowercase();
        if self.found_in(&text) {
            return true;
        }
        let source = job.source.to_lowercase();
        lexicon.local_boards.iter().any(|b| source.contains(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(country: &str, state: &str) -> Profile {
        Profile {
            country: country.into(),
            state: state.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn test_aliases_include_state_cities_and_country_cities() {
        let aliases = LocalityAliases::for_profile(
            &profile("India", "Karnataka (Bangalore/Mysore)"),
            &Lexicon::default(),
        );
        let list = aliases.as_slice();
        assert_eq!(list[0], "india");
        assert_eq!(list[1], "bangalore");
        assert_eq!(list[2], "mysore");
        assert!(list.contains(&"pune".to_string()));
    }

    #[test]
    fn test_any_state_adds_no_cities() {
        let aliases = LocalityAliases::for_profile(&profile("Germany", "Any"), &Lexicon::default());
        assert_eq!(aliases.as_slice(), ["germany"]);
    }

    #[test]
    fn test_remote_profile_has_no_aliases() {
        let aliases = LocalityAliases::for_profile(&profile("Remote Only", ""), &Lexicon::default());
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_is_local_by_text_or_board() {
        let lex = Lexicon::default();
        let aliases = LocalityAliases::for_profile(&profile("India", "Any"), &lex);

        let by_location = JobPosting {
            location: "Pune, Maharashtra".into(),
            ..JobPosting::default()
        };
        assert!(aliases.is_local(&by_location, &lex));
        assert!(aliases.mentioned_by(&by_location));

        let by_board = JobPosting {
            source: "LinkedIn".into(),
            ..JobPosting::default()
        };
        assert!(aliases.is_local(&by_board, &lex));
        assert!(!aliases.mentioned_by(&by_board));

        let remote = JobPosting {
            title: "Ops Analyst".into(),
            source: "Remotive".into(),
            ..JobPosting::default()
        };
        assert!(!aliases.is_local(&remote, &lex));
    }
}
