//! Deterministic structural coherence validator.

use super::CoherenceValidator;

/// Sentinel score meaning "too little structure to judge".
pub const INDETERMINATE_COHERENCE: f64 = 0.5;

/// Structure check: more than three words and a terminal period score 1.0,
/// anything else scores the [`INDETERMINATE_COHERENCE`] sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralCoherence;

impl StructuralCoherence {
    pub fn new() -> Self {
        Self
    }
}

impl CoherenceValidator for StructuralCoherence {
    fn validate(&self, response: &str) -> anyhow::Result<f64> {
        let words = response.split_whitespace().count();
        let terminated = response.trim_end().ends_with('.');

        Ok(if words > 3 && terminated {
            1.0
        } else {
            INDETERMINATE_COHERENCE
        })
    }
}
