//! Deterministic keyword safety validator.

use tracing::debug;

use super::patterns;
use super::{SafetyReport, SafetyValidator};

/// Keyword-table safety scorer.
///
/// Toxicity and harmful-content signals go to 1.0 when any harmful pattern
/// (built-in table or configured denied term) matches; the bias signal goes
/// to 1.0 when any bias pattern matches. Everything else stays 0.0. Signals
/// are binary on purpose: the scorer demonstrates the capability contract,
/// it does not grade severity.
#[derive(Debug, Clone, Default)]
pub struct KeywordSafety {
    denied_terms: Vec<String>,
}

impl KeywordSafety {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the built-in harmful table with policy-supplied terms,
    /// matched as case-insensitive substrings.
    pub fn with_denied_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denied_terms: terms
                .into_iter()
                .map(|t| t.into().to_lowercase())
                .collect(),
        }
    }

    fn denied_term_hit(&self, lowered: &str) -> Option<&str> {
        self.denied_terms
            .iter()
            .find(|term| !term.is_empty() && lowered.contains(term.as_str()))
            .map(String::as_str)
    }
}

impl SafetyValidator for KeywordSafety {
    fn validate(&self, response: &str) -> anyhow::Result<SafetyReport> {
        let lowered = response.to_lowercase();

        let harmful = patterns::harmful_matches(&lowered);
        let denied = self.denied_term_hit(&lowered);
        let bias = patterns::bias_matches(&lowered);

        if !harmful.is_empty() || denied.is_some() || !bias.is_empty() {
            debug!(?harmful, ?denied, ?bias, "safety patterns matched");
        }

        let toxicity = if harmful.is_empty() && denied.is_none() {
            0.0
        } else {
            1.0
        };
        let bias_signal = if bias.is_empty() { 0.0 } else { 1.0 };

        Ok(SafetyReport {
            toxicity,
            bias: bias_signal,
            harmful_content: toxicity,
        })
    }
}
