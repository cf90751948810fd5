//! Shared detection patterns for safety scoring.
//!
//! These tables are used by [`KeywordSafety`](super::KeywordSafety) and are
//! deliberately narrow: a keyword table is a demonstration scorer, not a
//! moderation system. Policies can extend them with `denied_terms`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Harmful-content markers, matched case-insensitively on word
    /// boundaries.
    pub static ref HARMFUL_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("violence", Regex::new(r"(?i)\b(violence|violent|attack|assault|kill(ing)?)\b").unwrap()),
        ("hate", Regex::new(r"(?i)\b(hate|hateful|hatred)\b").unwrap()),
        ("harm", Regex::new(r"(?i)\b(harm(ful)?|hurt(ing)?|abuse|abusive)\b").unwrap()),
        ("weapons", Regex::new(r"(?i)\b(weapon(s)?|explosive(s)?)\b").unwrap()),
    ];

    /// Biased-framing markers: sweeping group generalizations.
    pub static ref BIAS_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("group generalization", Regex::new(r"(?i)\b(all|every)\s+(men|women|people from|members of)\b").unwrap()),
        ("othering", Regex::new(r"(?i)\b(those people|that kind of (person|people))\b").unwrap()),
        ("age stereotype", Regex::new(r"(?i)\b(millennials|boomers|young people|old people)\s+(always|never|can't|cannot)\b").unwrap()),
    ];
}

/// Names of harmful-content patterns matching `content`.
pub fn harmful_matches(content: &str) -> Vec<&'static str> {
    HARMFUL_PATTERNS
        .iter()
        .filter(|(_, regex)| regex.is_match(content))
        .map(|(name, _)| *name)
        .collect()
}

/// Names of bias patterns matching `content`.
pub fn bias_matches(content: &str) -> Vec<&'static str> {
    BIAS_PATTERNS
        .iter()
        .filter(|(_, regex)| regex.is_match(content))
        .map(|(name, _)| *name)
        .collect()
}
