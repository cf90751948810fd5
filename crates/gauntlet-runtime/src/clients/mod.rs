//! LLM client abstractions for gauntlet-runtime.
//!
//! This module defines the client capability the harness delegates
//! generation to, plus deterministic local implementations for tests and
//! demos. A production client backed by a real provider implements the
//! same trait; none ships here.

mod scripted;

pub use scripted::{ScriptedClient, StaticClient};

use serde::{Deserialize, Serialize};

/// Metadata attached to a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model that produced the response.
    pub model: String,

    /// Tokens consumed by the call.
    pub tokens_used: u32,

    /// Wall-clock latency of the call.
    pub latency_ms: u64,
}

/// A generated response with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// The response text.
    pub response: String,

    /// Call metadata.
    pub metadata: GenerationMetadata,
}

/// Capability for generating a completion from a prompt.
pub trait LlmClient: Send + Sync {
    /// Generate a completion.
    ///
    /// Failures are opaque to the harness and propagate unchanged to the
    /// caller: no wrapping, no retries, no interpretation.
    fn generate(&self, prompt: &str) -> anyhow::Result<Generation>;
}
