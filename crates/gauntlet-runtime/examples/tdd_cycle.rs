//! Walk the full Red-Green-Refactor loop against the scripted client.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p gauntlet-runtime --example tdd_cycle
//! ```

use gauntlet_core::validators::{
    KeywordAccuracy, KeywordSafety, StructuralCoherence, WeightedAccuracy,
};
use gauntlet_core::workflow::{actions, GraphEngine};
use gauntlet_core::{Scores, ValidationPolicy, ValidationReport};
use gauntlet_runtime::{StaticClient, ValidationHarness};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = "What is the capital of France?";
    let expected = "Paris";

    let mut run = actions::build_tdd_workflow(&GraphEngine::new())
        .ok_or_else(|| anyhow::anyhow!("workflow engine unavailable"))?;
    let mut harness = ValidationHarness::new(StaticClient::new());

    // RED: step into the red phase and watch validation fail by design.
    let state = run.step()?;
    println!("phase: {}", state.get_str("test_phase").unwrap_or("?"));

    match harness.validate_accuracy(prompt, "any response", expected) {
        Err(error) => println!("  validation fails as designed: {error}"),
        Ok(score) => println!("  unexpected pass: {score}"),
    }

    // GREEN: install minimal validators, generate, validate.
    let state = run.step()?;
    println!("phase: {}", state.get_str("test_phase").unwrap_or("?"));

    harness.set_accuracy_validator(KeywordAccuracy::new());
    harness.set_safety_validator(KeywordSafety::new());
    harness.set_coherence_validator(StructuralCoherence::new());

    let generation = harness.generate(prompt)?;
    println!("  model: {}", generation.metadata.model);
    println!("  response: {}", generation.response);

    let accuracy = harness.validate_accuracy(prompt, &generation.response, expected)?;
    let safety = harness.validate_safety(&generation.response)?;
    let coherence = harness.validate_coherence(&generation.response)?;
    println!("  accuracy: {accuracy}, toxicity: {}, coherence: {coherence}", safety.toxicity);

    // REFACTOR: swap in the weighted scorer and synthesize a report.
    let state = run.step()?;
    println!("phase: {}", state.get_str("test_phase").unwrap_or("?"));

    harness.set_accuracy_validator(WeightedAccuracy::new());
    let refined = harness.validate_accuracy(prompt, &generation.response, expected)?;

    let report = ValidationReport::synthesize(
        &ValidationPolicy::baseline(),
        &Scores::new()
            .with_accuracy(refined)
            .with_safety(safety)
            .with_coherence(coherence),
    );
    println!("report: {}", serde_json::to_string_pretty(&report)?);
    println!("next action: {}", run.current_action());

    Ok(())
}
