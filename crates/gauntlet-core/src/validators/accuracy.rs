//! Deterministic accuracy validators.
//!
//! Three escalating implementations of [`AccuracyValidator`]:
//!
//! - [`KeywordAccuracy`]: binary containment check, the minimal "green
//!   phase" scorer.
//! - [`WeightedAccuracy`]: containment blended with length and structure
//!   signals.
//! - [`OverlapAccuracy`]: Jaccard word overlap against the expected text.
//!
//! All are pure functions of their inputs. Same arguments, same score.

use super::AccuracyValidator;

/// Binary keyword containment: 1.0 when the expected answer appears in the
/// response (case-insensitive), 0.0 otherwise. Empty inputs score 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAccuracy;

impl KeywordAccuracy {
    pub fn new() -> Self {
        Self
    }
}

impl AccuracyValidator for KeywordAccuracy {
    fn validate(&self, prompt: &str, response: &str, expected: &str) -> anyhow::Result<f64> {
        if prompt.is_empty() || response.is_empty() || expected.is_empty() {
            return Ok(0.0);
        }

        let hit = response.to_lowercase().contains(&expected.to_lowercase());
        Ok(if hit { 1.0 } else { 0.0 })
    }
}

/// Weighted blend of containment (0.6), length band (0.2) and terminal
/// punctuation (0.2).
///
/// A response between 10 and 200 characters scores full marks on the
/// length band; anything else scores half. A response ending with a period
/// scores full marks on structure; anything else scores 0.8.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedAccuracy;

impl WeightedAccuracy {
    pub fn new() -> Self {
        Self
    }
}

impl AccuracyValidator for WeightedAccuracy {
    fn validate(&self, prompt: &str, response: &str, expected: &str) -> anyhow::Result<f64> {
        if prompt.is_empty() || response.is_empty() || expected.is_empty() {
            return Ok(0.0);
        }

        let keyword = if response.to_lowercase().contains(&expected.to_lowercase()) {
            1.0
        } else {
            0.0
        };
        let length = if (10..=200).contains(&response.len()) {
            1.0
        } else {
            0.5
        };
        let structure = if response.trim_end().ends_with('.') {
            1.0
        } else {
            0.8
        };

        Ok(keyword * 0.6 + length * 0.2 + structure * 0.2)
    }
}

/// Jaccard word overlap between response and expected text.
///
/// Tokenization is lowercase whitespace splitting; the score is
/// `|intersection| / |union|` over the two word sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapAccuracy;

impl OverlapAccuracy {
    pub fn new() -> Self {
        Self
    }
}

impl AccuracyValidator for OverlapAccuracy {
    fn validate(&self, _prompt: &str, response: &str, expected: &str) -> anyhow::Result<f64> {
        if response.is_empty() || expected.is_empty() {
            return Ok(0.0);
        }

        let response_words: std::collections::BTreeSet<String> = response
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let expected_words: std::collections::BTreeSet<String> = expected
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if response_words.is_empty() || expected_words.is_empty() {
            return Ok(0.0);
        }

        let common = response_words.intersection(&expected_words).count();
        let total = response_words.len() + expected_words.len() - common;

        if total == 0 {
            return Ok(1.0);
        }

        Ok(common as f64 / total as f64)
    }
}
