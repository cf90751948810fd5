//! # gauntlet-core
//!
//! Deterministic Red-Green-Refactor toolkit for LLM output validation.
//!
//! This crate provides the deterministic side of Gauntlet:
//! - an immutable workflow state and the cyclic red → green → refactor
//!   graph that drives the TDD loop
//! - validator capability traits with deterministic built-in scorers
//! - validation policies (thresholds, weights, safety limits) and report
//!   synthesis
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No LLM calls**: Everything here is pure computation; LLM clients
//!    live in `gauntlet-runtime`
//! 3. **Immutable state**: Workflow actions never mutate their input
//!    snapshot
//! 4. **Degradable**: An absent workflow engine yields `None`, never a
//!    panic
//!
//! ## Example
//!
//! ```rust
//! use gauntlet_core::{evaluate, ValidationPolicy};
//!
//! let policy = ValidationPolicy::baseline();
//! let report = evaluate(
//!     &policy,
//!     "What is the capital of France?",
//!     "The capital of France is Paris.",
//!     "Paris",
//! )
//! .unwrap();
//!
//! assert!(report.passed);
//! ```

pub mod policy;
pub mod report;
pub mod state;
pub mod validators;
pub mod workflow;

// Re-export main types at crate root
pub use policy::{CriterionPolicy, PolicyError, SafetyLimits, SafetyPolicy, ValidationPolicy};
pub use report::{CriterionOutcome, Scores, ValidationReport};
pub use state::WorkflowState;
pub use validators::{
    AccuracyValidator, CoherenceValidator, KeywordAccuracy, KeywordSafety, SafetyReport,
    SafetyValidator, StructuralCoherence, ValidatorKind,
};
pub use workflow::{
    GraphBuilder, GraphEngine, NoopEngine, WorkflowEngine, WorkflowError, WorkflowGraph,
    WorkflowRun,
};

use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Validator(#[from] anyhow::Error),
}

/// Evaluate a response with the built-in validators under a policy.
///
/// This is the deterministic entry point: each criterion the policy scores
/// is measured with the corresponding built-in validator, and the results
/// are synthesized into a [`ValidationReport`]. Drivers that want custom
/// validators use the harness in `gauntlet-runtime` instead.
///
/// # Arguments
///
/// * `policy` - Thresholds and weights to apply
/// * `prompt` - The prompt the response answers
/// * `response` - The LLM response under validation
/// * `expected` - The expected answer for accuracy scoring
pub fn evaluate(
    policy: &ValidationPolicy,
    prompt: &str,
    response: &str,
    expected: &str,
) -> Result<ValidationReport, EvaluationError> {
    let mut scores = Scores::new();

    if policy.accuracy.is_some() {
        scores.accuracy = Some(KeywordAccuracy::new().validate(prompt, response, expected)?);
    }

    if policy.safety.is_some() {
        let validator = KeywordSafety::with_denied_terms(policy.denied_terms().iter().cloned());
        scores.safety = Some(validator.validate(response)?);
    }

    if policy.coherence.is_some() {
        scores.coherence = Some(StructuralCoherence::new().validate(response)?);
    }

    Ok(ValidationReport::synthesize(policy, &scores))
}
