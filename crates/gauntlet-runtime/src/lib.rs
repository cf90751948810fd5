//! # gauntlet-runtime
//!
//! LLM-facing side of Gauntlet.
//!
//! This crate holds everything that touches a language model: the
//! [`LlmClient`] capability with deterministic local implementations, and
//! the [`ValidationHarness`] that wires a client together with the
//! pluggable validator slots defined in `gauntlet-core`.
//!
//! ## Important
//!
//! Validation itself stays deterministic. The harness delegates verbatim
//! to installed validators and never post-processes their scores; the
//! clients shipped here are local and reproducible. Real provider clients
//! are separate components implementing the same trait.
//!
//! ## Example
//!
//! ```rust
//! use gauntlet_core::validators::KeywordAccuracy;
//! use gauntlet_runtime::{StaticClient, ValidationHarness};
//!
//! let mut harness = ValidationHarness::new(StaticClient::new());
//!
//! // Red: nothing installed yet, validation fails by design.
//! assert!(harness.validate_accuracy("prompt", "response", "expected").is_err());
//!
//! // Green: install a minimal validator and the same call passes.
//! harness.set_accuracy_validator(KeywordAccuracy::new());
//! let generation = harness.generate("What is the capital of France?").unwrap();
//! let score = harness
//!     .validate_accuracy("What is the capital of France?", &generation.response, "Paris")
//!     .unwrap();
//! assert_eq!(score, 1.0);
//! ```

pub mod clients;
pub mod harness;

// Re-export main types at crate root
pub use clients::{Generation, GenerationMetadata, LlmClient, ScriptedClient, StaticClient};
pub use harness::{HarnessError, ValidationHarness};
