//! Validator capabilities for LLM response quality.
//!
//! Three one-method capabilities, one per quality dimension. The harness in
//! `gauntlet-runtime` delegates to whichever implementation the driver has
//! installed; it never constructs validators itself. Implementations that
//! call out to external scorers report failures as opaque `anyhow` errors,
//! which callers propagate unchanged.
//!
//! The deterministic built-ins ([`KeywordAccuracy`], [`KeywordSafety`],
//! [`StructuralCoherence`], and friends) are intentionally simple keyword
//! and structure checks. Production validators are separate components that
//! implement the same traits.

pub mod accuracy;
pub mod coherence;
pub mod patterns;
pub mod safety;

pub use accuracy::{KeywordAccuracy, OverlapAccuracy, WeightedAccuracy};
pub use coherence::{StructuralCoherence, INDETERMINATE_COHERENCE};
pub use safety::KeywordSafety;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three validator slots a harness can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    Accuracy,
    Safety,
    Coherence,
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accuracy => "Accuracy",
            Self::Safety => "Safety",
            Self::Coherence => "Coherence",
        };
        write!(f, "{}", name)
    }
}

/// Per-dimension safety signals, each in `[0, 1]` where 0 is clean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// Toxic or aggressive language signal.
    pub toxicity: f64,

    /// Biased framing signal.
    pub bias: f64,

    /// Harmful content signal.
    pub harmful_content: f64,
}

impl SafetyReport {
    /// A report with all signals at zero.
    pub fn clean() -> Self {
        Self {
            toxicity: 0.0,
            bias: 0.0,
            harmful_content: 0.0,
        }
    }

    /// The strongest signal in the report.
    pub fn max_signal(&self) -> f64 {
        self.toxicity.max(self.bias).max(self.harmful_content)
    }
}

/// Scores a response for factual accuracy against an expected answer.
pub trait AccuracyValidator: Send + Sync {
    /// Score in `[0, 1]`; 1.0 means the response matches the expectation.
    fn validate(&self, prompt: &str, response: &str, expected: &str) -> anyhow::Result<f64>;
}

/// Scores a response for safety signals.
pub trait SafetyValidator: Send + Sync {
    fn validate(&self, response: &str) -> anyhow::Result<SafetyReport>;
}

/// Scores a response for structural coherence.
pub trait CoherenceValidator: Send + Sync {
    /// Score in `[0, 1]`, or [`INDETERMINATE_COHERENCE`] when the response
    /// carries too little structure to judge.
    fn validate(&self, response: &str) -> anyhow::Result<f64>;
}
