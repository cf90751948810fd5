//! The validation harness.
//!
//! A [`ValidationHarness`] owns an LLM client and three optional validator
//! slots, one per quality dimension. Entry points delegate verbatim to the
//! installed validator; an empty slot fails with
//! [`HarnessError::NotConfigured`]. That failure is the designed "red"
//! state of the TDD loop, not a bug condition: drivers call the entry
//! points first, watch them fail, then install an implementation.
//!
//! The harness is a passthrough. No caching, no retries, no
//! post-processing, and no hidden state: two identical calls against the
//! same installed validator return identical results.

use thiserror::Error;
use tracing::{debug, warn};

use gauntlet_core::validators::{
    AccuracyValidator, CoherenceValidator, SafetyReport, SafetyValidator, ValidatorKind,
};

use crate::clients::{Generation, LlmClient};

/// Errors from the validation harness.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The entry point's validator slot is empty. The designed red-phase
    /// failure.
    #[error("{0} validator not implemented")]
    NotConfigured(ValidatorKind),

    /// Opaque failure from an installed validator, passed through
    /// unchanged.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// LLM client plus three pluggable validator slots.
pub struct ValidationHarness {
    client: Box<dyn LlmClient>,
    accuracy: Option<Box<dyn AccuracyValidator>>,
    safety: Option<Box<dyn SafetyValidator>>,
    coherence: Option<Box<dyn CoherenceValidator>>,
}

impl ValidationHarness {
    /// Create a harness around a client, with all validator slots empty.
    pub fn new(client: impl LlmClient + 'static) -> Self {
        Self {
            client: Box::new(client),
            accuracy: None,
            safety: None,
            coherence: None,
        }
    }

    /// Install the accuracy validator.
    pub fn set_accuracy_validator(&mut self, validator: impl AccuracyValidator + 'static) {
        debug!(validator = %ValidatorKind::Accuracy, "validator installed");
        self.accuracy = Some(Box::new(validator));
    }

    /// Install the safety validator.
    pub fn set_safety_validator(&mut self, validator: impl SafetyValidator + 'static) {
        debug!(validator = %ValidatorKind::Safety, "validator installed");
        self.safety = Some(Box::new(validator));
    }

    /// Install the coherence validator.
    pub fn set_coherence_validator(&mut self, validator: impl CoherenceValidator + 'static) {
        debug!(validator = %ValidatorKind::Coherence, "validator installed");
        self.coherence = Some(Box::new(validator));
    }

    /// Whether a slot is populated.
    pub fn has_validator(&self, kind: ValidatorKind) -> bool {
        match kind {
            ValidatorKind::Accuracy => self.accuracy.is_some(),
            ValidatorKind::Safety => self.safety.is_some(),
            ValidatorKind::Coherence => self.coherence.is_some(),
        }
    }

    /// Generate a completion through the owned client.
    ///
    /// Client failures are opaque and propagate unchanged.
    pub fn generate(&self, prompt: &str) -> anyhow::Result<Generation> {
        self.client.generate(prompt)
    }

    /// Validate response accuracy against an expected answer.
    pub fn validate_accuracy(
        &self,
        prompt: &str,
        response: &str,
        expected: &str,
    ) -> Result<f64, HarnessError> {
        match &self.accuracy {
            Some(validator) => {
                debug!(validator = %ValidatorKind::Accuracy, "delegating validation");
                Ok(validator.validate(prompt, response, expected)?)
            }
            None => Err(self.not_configured(ValidatorKind::Accuracy)),
        }
    }

    /// Validate response safety.
    pub fn validate_safety(&self, response: &str) -> Result<SafetyReport, HarnessError> {
        match &self.safety {
            Some(validator) => {
                debug!(validator = %ValidatorKind::Safety, "delegating validation");
                Ok(validator.validate(response)?)
            }
            None => Err(self.not_configured(ValidatorKind::Safety)),
        }
    }

    /// Validate response coherence.
    pub fn validate_coherence(&self, response: &str) -> Result<f64, HarnessError> {
        match &self.coherence {
            Some(validator) => {
                debug!(validator = %ValidatorKind::Coherence, "delegating validation");
                Ok(validator.validate(response)?)
            }
            None => Err(self.not_configured(ValidatorKind::Coherence)),
        }
    }

    fn not_configured(&self, kind: ValidatorKind) -> HarnessError {
        warn!(validator = %kind, "validation requested with empty slot");
        HarnessError::NotConfigured(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::StaticClient;
    use gauntlet_core::validators::{KeywordAccuracy, KeywordSafety, StructuralCoherence};

    const PROMPT: &str = "What is the capital of France?";
    const RESPONSE: &str = "The capital of France is Paris.";

    /// Accuracy validator pinned to one score, whatever the arguments.
    struct ConstAccuracy(f64);

    impl AccuracyValidator for ConstAccuracy {
        fn validate(&self, _prompt: &str, _response: &str, _expected: &str) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    /// Accuracy validator that always fails.
    struct BrokenAccuracy;

    impl AccuracyValidator for BrokenAccuracy {
        fn validate(&self, _prompt: &str, _response: &str, _expected: &str) -> anyhow::Result<f64> {
            Err(anyhow::anyhow!("scorer backend unreachable"))
        }
    }

    /// Client that always fails.
    struct FailingClient;

    impl LlmClient for FailingClient {
        fn generate(&self, _prompt: &str) -> anyhow::Result<Generation> {
            Err(anyhow::anyhow!("API Error"))
        }
    }

    fn empty_harness() -> ValidationHarness {
        ValidationHarness::new(StaticClient::new())
    }

    #[test]
    fn test_accuracy_fails_before_validator_installed() {
        let harness = empty_harness();
        let result = harness.validate_accuracy(PROMPT, RESPONSE, "Paris");

        let error = result.unwrap_err();
        assert!(matches!(
            error,
            HarnessError::NotConfigured(ValidatorKind::Accuracy)
        ));
        assert_eq!(error.to_string(), "Accuracy validator not implemented");
    }

    #[test]
    fn test_safety_fails_before_validator_installed() {
        let harness = empty_harness();
        let error = harness.validate_safety("This is a safe response.").unwrap_err();

        assert!(matches!(
            error,
            HarnessError::NotConfigured(ValidatorKind::Safety)
        ));
        assert_eq!(error.to_string(), "Safety validator not implemented");
    }

    #[test]
    fn test_coherence_fails_before_validator_installed() {
        let harness = empty_harness();
        let error = harness
            .validate_coherence("This is a coherent response.")
            .unwrap_err();

        assert!(matches!(
            error,
            HarnessError::NotConfigured(ValidatorKind::Coherence)
        ));
        assert_eq!(error.to_string(), "Coherence validator not implemented");
    }

    #[test]
    fn test_slots_are_independent() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(KeywordAccuracy::new());

        assert!(harness.has_validator(ValidatorKind::Accuracy));
        assert!(!harness.has_validator(ValidatorKind::Safety));

        // Installing accuracy does not unlock the other entry points.
        assert!(harness.validate_accuracy(PROMPT, RESPONSE, "Paris").is_ok());
        assert!(harness.validate_safety(RESPONSE).is_err());
        assert!(harness.validate_coherence(RESPONSE).is_err());
    }

    #[test]
    fn test_minimal_accuracy_validator_scores_hit() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(KeywordAccuracy::new());

        let score = harness.validate_accuracy(PROMPT, RESPONSE, "Paris").unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_minimal_safety_validator_scores_clean_response() {
        let mut harness = empty_harness();
        harness.set_safety_validator(KeywordSafety::new());

        let report = harness
            .validate_safety("This is a safe and helpful response.")
            .unwrap();
        assert_eq!(report.toxicity, 0.0);
        assert_eq!(report.harmful_content, 0.0);
    }

    #[test]
    fn test_minimal_coherence_validator_scores_structure() {
        let mut harness = empty_harness();
        harness.set_coherence_validator(StructuralCoherence::new());

        let score = harness
            .validate_coherence("This is a well-structured response.")
            .unwrap();
        assert!(score >= 0.5);
    }

    #[test]
    fn test_delegation_is_identity_passthrough() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(ConstAccuracy(0.95));

        // The validator's return value comes back unmodified, whatever the
        // arguments.
        assert_eq!(harness.validate_accuracy("a", "b", "c").unwrap(), 0.95);
        assert_eq!(harness.validate_accuracy("", "", "").unwrap(), 0.95);
    }

    #[test]
    fn test_repeated_calls_are_idempotent() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(KeywordAccuracy::new());

        let first = harness.validate_accuracy(PROMPT, RESPONSE, "Paris").unwrap();
        let second = harness.validate_accuracy(PROMPT, RESPONSE, "Paris").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reinstalling_replaces_validator() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(ConstAccuracy(1.0));
        harness.set_accuracy_validator(ConstAccuracy(0.95));

        assert_eq!(harness.validate_accuracy("x", "y", "z").unwrap(), 0.95);
    }

    #[test]
    fn test_validator_failure_propagates_unchanged() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(BrokenAccuracy);

        let error = harness.validate_accuracy(PROMPT, RESPONSE, "Paris").unwrap_err();
        assert!(matches!(error, HarnessError::Upstream(_)));
        assert_eq!(error.to_string(), "scorer backend unreachable");
    }

    #[test]
    fn test_client_error_propagates_unchanged() {
        let harness = ValidationHarness::new(FailingClient);
        let error = harness.generate("test prompt").unwrap_err();
        assert_eq!(error.to_string(), "API Error");
    }

    #[test]
    fn test_generate_passes_through_client() {
        let harness = empty_harness();
        let generation = harness.generate(PROMPT).unwrap();

        assert_eq!(generation.response, RESPONSE);
        assert_eq!(generation.metadata.tokens_used, 25);
    }

    #[test]
    fn test_empty_inputs_reach_installed_validator() {
        let mut harness = empty_harness();
        harness.set_accuracy_validator(KeywordAccuracy::new());

        assert_eq!(harness.validate_accuracy("", "", "").unwrap(), 0.0);
        assert_eq!(harness.validate_accuracy("test", "test", "").unwrap(), 0.0);
    }
}
