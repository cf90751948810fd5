//! Deterministic local clients.
//!
//! Both clients here are pure functions of the prompt: same prompt, same
//! generation. They stand in for a real provider in tests and demos.

use tracing::debug;

use super::{Generation, GenerationMetadata, LlmClient};

/// Fixed latency reported by the local clients.
const LOCAL_LATENCY_MS: u64 = 150;

/// A client that returns one canned generation for every prompt.
#[derive(Debug, Clone)]
pub struct StaticClient {
    generation: Generation,
}

impl StaticClient {
    /// The canonical canned response.
    pub fn new() -> Self {
        Self {
            generation: Generation {
                response: "The capital of France is Paris.".to_string(),
                metadata: GenerationMetadata {
                    model: "claude-3-sonnet".to_string(),
                    tokens_used: 25,
                    latency_ms: LOCAL_LATENCY_MS,
                },
            },
        }
    }

    /// A client pinned to the given generation.
    pub fn with_generation(generation: Generation) -> Self {
        Self { generation }
    }
}

impl Default for StaticClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmClient for StaticClient {
    fn generate(&self, _prompt: &str) -> anyhow::Result<Generation> {
        Ok(self.generation.clone())
    }
}

/// A client that answers with a fixed response per prompt class.
///
/// The prompt is classified by keyword (question, code, explanation,
/// analysis, or default) and each class has exactly one response, so the
/// mapping is stable across calls.
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    model: String,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            model: "scripted-local".to_string(),
        }
    }

    /// Use a different model name in reported metadata.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    fn response_for(prompt: &str) -> &'static str {
        let lower = prompt.to_lowercase();

        if ["question", "what", "how"].iter().any(|k| lower.contains(k)) {
            return "Based on the available information, the answer involves multiple \
                    factors that need to be considered carefully.";
        }

        if ["code", "function", "programming"]
            .iter()
            .any(|k| lower.contains(k))
        {
            return "Here's a well-structured implementation that follows best practices \
                    and handles edge cases appropriately.";
        }

        if ["explain", "describe"].iter().any(|k| lower.contains(k)) {
            return "Let me break this down into key components to provide a clear and \
                    comprehensive explanation.";
        }

        if ["analyze", "review"].iter().any(|k| lower.contains(k)) {
            return "After thorough analysis, several important patterns and insights \
                    emerge from the data.";
        }

        "This is a comprehensive response that addresses the key points raised in your prompt."
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmClient for ScriptedClient {
    fn generate(&self, prompt: &str) -> anyhow::Result<Generation> {
        let response = Self::response_for(prompt);
        debug!(model = %self.model, chars = response.len(), "scripted generation");

        Ok(Generation {
            response: response.to_string(),
            // Rough 4-chars-per-token estimate, good enough for a local client.
            metadata: GenerationMetadata {
                model: self.model.clone(),
                tokens_used: (response.len() / 4) as u32,
                latency_ms: LOCAL_LATENCY_MS,
            },
        })
    }
}
