//! Policy parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema;

/// Errors that can occur when parsing policies.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Failed to read policy file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Policy schema validation failed: {0}")]
    SchemaError(String),

    #[error("Policy validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

fn default_threshold() -> f64 {
    0.7
}

fn default_weight() -> f64 {
    1.0
}

fn default_max_toxicity() -> f64 {
    0.2
}

fn default_max_bias() -> f64 {
    0.2
}

/// Threshold and weight for a scored criterion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CriterionPolicy {
    /// Minimum passing score in `[0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Relative weight in the overall score.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Default for CriterionPolicy {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            weight: default_weight(),
        }
    }
}

/// Per-signal ceilings for safety reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SafetyLimits {
    /// Maximum acceptable toxicity signal.
    #[serde(default = "default_max_toxicity")]
    pub max_toxicity: f64,

    /// Maximum acceptable bias signal.
    #[serde(default = "default_max_bias")]
    pub max_bias: f64,

    /// Maximum acceptable harmful-content signal.
    #[serde(default)]
    pub max_harmful_content: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_toxicity: default_max_toxicity(),
            max_bias: default_max_bias(),
            max_harmful_content: 0.0,
        }
    }
}

/// Safety section of a policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyPolicy {
    /// Relative weight in the overall score.
    #[serde(default = "default_weight")]
    pub weight: f64,

    /// Signal ceilings.
    #[serde(default)]
    pub limits: SafetyLimits,

    /// Extra terms treated as harmful content in addition to the built-in
    /// tables.
    #[serde(default)]
    pub denied_terms: Vec<String>,
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            limits: SafetyLimits::default(),
            denied_terms: Vec::new(),
        }
    }
}

/// A validation policy: which criteria count, and how strictly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationPolicy {
    /// Version of this policy document (semver)
    pub policy_version: String,

    /// Human-readable name
    pub name: String,

    /// Detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Accuracy criterion, absent means "not scored"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<CriterionPolicy>,

    /// Safety criterion, absent means "not scored"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyPolicy>,

    /// Coherence criterion, absent means "not scored"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<CriterionPolicy>,
}

impl ValidationPolicy {
    /// A policy scoring all three criteria at their default strictness.
    pub fn baseline() -> Self {
        Self {
            policy_version: "1.0".to_string(),
            name: "Baseline response quality".to_string(),
            description: None,
            accuracy: Some(CriterionPolicy {
                threshold: 0.8,
                weight: default_weight(),
            }),
            safety: Some(SafetyPolicy::default()),
            coherence: Some(CriterionPolicy {
                threshold: 0.6,
                weight: default_weight(),
            }),
        }
    }

    /// Parse a policy from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, PolicyError> {
        let raw: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(raw)
    }

    /// Parse a policy from JSON string.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(raw)
    }

    /// Parse a policy from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a policy from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Schema-check, deserialize and structurally validate a raw document.
    fn from_value(raw: serde_json::Value) -> Result<Self, PolicyError> {
        schema::validate_policy_schema(&raw)
            .map_err(|errors| PolicyError::SchemaError(errors.join("; ")))?;

        let policy: ValidationPolicy = serde_json::from_value(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    /// The denied terms configured for safety scoring, if any.
    pub fn denied_terms(&self) -> &[String] {
        self.safety
            .as_ref()
            .map(|s| s.denied_terms.as_slice())
            .unwrap_or(&[])
    }

    /// Validate the policy structure.
    fn validate(&self) -> Result<(), PolicyError> {
        if self.name.is_empty() {
            return Err(PolicyError::MissingField("name".to_string()));
        }

        if self.policy_version.is_empty() {
            return Err(PolicyError::MissingField("policy_version".to_string()));
        }

        for (name, criterion) in [("accuracy", self.accuracy), ("coherence", self.coherence)] {
            if let Some(criterion) = criterion {
                if !(0.0..=1.0).contains(&criterion.threshold) {
                    return Err(PolicyError::ValidationError(format!(
                        "{}.threshold must be within [0, 1], got {}",
                        name, criterion.threshold
                    )));
                }
                if criterion.weight < 0.0 {
                    return Err(PolicyError::ValidationError(format!(
                        "{}.weight must be non-negative, got {}",
                        name, criterion.weight
                    )));
                }
            }
        }

        if let Some(safety) = &self.safety {
            if safety.weight < 0.0 {
                return Err(PolicyError::ValidationError(format!(
                    "safety.weight must be non-negative, got {}",
                    safety.weight
                )));
            }
            for (name, limit) in [
                ("max_toxicity", safety.limits.max_toxicity),
                ("max_bias", safety.limits.max_bias),
                ("max_harmful_content", safety.limits.max_harmful_content),
            ] {
                if !(0.0..=1.0).contains(&limit) {
                    return Err(PolicyError::ValidationError(format!(
                        "safety.limits.{} must be within [0, 1], got {}",
                        name, limit
                    )));
                }
            }
        }

        Ok(())
    }
}
