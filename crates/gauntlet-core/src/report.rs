//! Report synthesis: aggregates measured scores into a verdict.
//!
//! The synthesizer applies strict, non-configurable aggregation rules:
//! 1. A criterion is reported only when the policy scores it AND a
//!    measurement exists for it
//! 2. The overall score is the weight-normalized average of reported
//!    criterion scores
//! 3. The report passes only when at least one criterion was reported and
//!    every reported criterion passed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::ValidationPolicy;
use crate::validators::SafetyReport;

/// Measured scores collected by a driver, any subset may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Accuracy score in `[0, 1]`.
    pub accuracy: Option<f64>,

    /// Safety signals.
    pub safety: Option<SafetyReport>,

    /// Coherence score in `[0, 1]`.
    pub coherence: Option<f64>,
}

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accuracy(mut self, score: f64) -> Self {
        self.accuracy = Some(score);
        self
    }

    pub fn with_safety(mut self, report: SafetyReport) -> Self {
        self.safety = Some(report);
        self
    }

    pub fn with_coherence(mut self, score: f64) -> Self {
        self.coherence = Some(score);
        self
    }
}

/// Verdict on a single criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionOutcome {
    /// Criterion name: "accuracy", "safety" or "coherence".
    pub name: String,

    /// Measured score in `[0, 1]`.
    pub score: f64,

    /// Minimum passing score.
    pub threshold: f64,

    /// Relative weight in the overall score.
    pub weight: f64,

    /// Whether the criterion passed.
    pub passed: bool,

    /// What this criterion measures.
    pub details: String,
}

/// Aggregated verdict over all reported criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Per-criterion verdicts, in accuracy/safety/coherence order.
    pub criteria: Vec<CriterionOutcome>,

    /// Weight-normalized average of criterion scores, 0.0 when nothing
    /// was reported.
    pub overall_score: f64,

    /// Whether every reported criterion passed (false when none were).
    pub passed: bool,

    /// Timestamp of synthesis.
    pub evaluated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Synthesize a report from a policy and a set of measured scores.
    pub fn synthesize(policy: &ValidationPolicy, scores: &Scores) -> Self {
        let mut criteria = Vec::new();
        let mut total = 0.0;
        let mut total_weight = 0.0;

        if let (Some(criterion), Some(score)) = (policy.accuracy, scores.accuracy) {
            criteria.push(CriterionOutcome {
                name: "accuracy".to_string(),
                score,
                threshold: criterion.threshold,
                weight: criterion.weight,
                passed: score >= criterion.threshold,
                details: "Measures how well the response matches the expected answer".to_string(),
            });
            total += score * criterion.weight;
            total_weight += criterion.weight;
        }

        if let (Some(criterion), Some(report)) = (&policy.safety, scores.safety) {
            let score = 1.0 - report.max_signal();
            let passed = report.toxicity <= criterion.limits.max_toxicity
                && report.bias <= criterion.limits.max_bias
                && report.harmful_content <= criterion.limits.max_harmful_content;
            // The threshold column records the floor implied by the
            // strictest limit; pass/fail is checked per signal above.
            let threshold = 1.0
                - criterion
                    .limits
                    .max_toxicity
                    .min(criterion.limits.max_bias)
                    .min(criterion.limits.max_harmful_content);

            criteria.push(CriterionOutcome {
                name: "safety".to_string(),
                score,
                threshold,
                weight: criterion.weight,
                passed,
                details: "Measures toxicity, bias and harmful-content signals".to_string(),
            });
            total += score * criterion.weight;
            total_weight += criterion.weight;
        }

        if let (Some(criterion), Some(score)) = (policy.coherence, scores.coherence) {
            criteria.push(CriterionOutcome {
                name: "coherence".to_string(),
                score,
                threshold: criterion.threshold,
                weight: criterion.weight,
                passed: score >= criterion.threshold,
                details: "Measures structural coherence of the response".to_string(),
            });
            total += score * criterion.weight;
            total_weight += criterion.weight;
        }

        let overall_score = if total_weight > 0.0 {
            total / total_weight
        } else {
            0.0
        };
        let passed = !criteria.is_empty() && criteria.iter().all(|c| c.passed);

        Self {
            criteria,
            overall_score,
            passed,
            evaluated_at: Utc::now(),
        }
    }

    /// Look up a criterion verdict by name.
    pub fn criterion(&self, name: &str) -> Option<&CriterionOutcome> {
        self.criteria.iter().find(|c| c.name == name)
    }
}
