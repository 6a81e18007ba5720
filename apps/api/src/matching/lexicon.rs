//! Fixed word lists used by the matcher.
//!
//! Bundled into [`Lexicon`] and passed to each scoring step so tests can swap tables.

/// Words ignored when building keywords from headlines and skills.
pub const STOP_WORDS: &[&str] = &[
    "and", "the", "for", "with", "from", "into", "our", "you", "your", "tool", "tools", "using",
    "based", "related", "across", "including", "such", "various", "multiple", "key", "core",
    "new", "high", "low",
];

/// Extra spellings added when a skill word matches the left-hand side.
pub const STEM_VARIANTS: &[(&str, &[&str])] = &[
    ("operations", &["operational", "ops"]),
    ("management", &["manager", "managing"]),
    ("manager", &["management", "managing"]),
    ("automation", &["automated", "automate"]),
    ("integration", &["integrating", "integrate"]),
    ("development", &["developer", "developing"]),
    ("engineering", &["engineer"]),
];

/// Title substrings marking leadership roles.
pub const SENIOR_MARKERS: &[&str] = &[
    "lead",
    "head of",
    "director",
    "vp ",
    "vice president",
    "principal",
    "chief",
    "cto",
    "coo",
    "ceo",
    "cfo",
    "founding",
    "co-founder",
    "svp",
    "evp",
    "staff engineer",
    "distinguished",
];

pub const MID_MARKERS: &[&str] = &["senior", "sr ", "sr."];

pub const NON_ENGLISH_INDICATORS: &[&str] = &[
    "español",
    "português",
    "français",
    "deutsch",
    "中文",
    "日本語",
    "한국어",
];

/// Sources whose postings get a flat bonus in the final blend.
pub const PRIORITY_SOURCES: &[&str] = &["google jobs", "indeed", "naukri", "linkedin", "glassdoor"];

/// Boards whose postings are treated as local regardless of their text.
pub const LOCAL_BOARDS: &[&str] = &["google jobs", "linkedin", "naukri", "lever", "indeed"];

/// Major cities added to the locality aliases of a country.
pub const COUNTRY_CITIES: &[(&str, &[&str])] = &[(
    "india",
    &[
        "bangalore",
        "bengaluru",
        "mumbai",
        "delhi",
        "hyderabad",
        "pune",
        "chennai",
    ],
)];

#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub stop_words: &'static [&'static str],
    pub stem_variants: &'static [(&'static str, &'static [&'static str])],
    pub senior_markers: &'static [&'static str],
    pub mid_markers: &'static [&'static str],
    pub non_english: &'static [&'static str],
    pub priority_sources: &'static [&'static str],
    pub local_boards: &'static [&'static str],
    pub country_cities: &'static [(&'static str, &'static [&'static str])],
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS,
            stem_variants: STEM_VARIANTS,
            senior_markers: SENIOR_MARKERS,
            mid_markers: MID_MARKERS,
            non_english: NON_ENGLISH_INDICATORS,
            priority_sources: PRIORITY_SOURCES,
            local_boards: LOCAL_BOARDS,
            country_cities: COUNTRY_CITIES,
        }
    }
}

impl Lexicon {
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word)
    }

    pub fn stems_of(&self, word: &str) -> &'static [&'static str] {
        self.stem_variants
            .iter()
            .find(|(base, _)| *base == word)
            .map(|(_, variants)| *variants)
            .unwrap_or(&[])
    }

    pub fn cities_of(&self, country: &str) -> &'static [&'static str] {
        self.country_cities
            .iter()
            .find(|(name, _)| *name == country)
            .map(|(_, cities)| *cities)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stems_lookup() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.stems_of("operations"), ["operational", "ops"]);
        assert!(lexicon.stems_of("fintech").is_empty());
    }

    #[test]
    fn test_cities_lookup_is_exact() {
        let lexicon = Lexicon::default();
        assert!(lexicon.cities_of("india").contains(&"pune"));
        assert!(lexicon.cities_of("India").is_empty());
    }
}
