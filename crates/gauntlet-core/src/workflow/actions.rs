//! The canonical Red-Green-Refactor graph.
//!
//! Three pure actions over [`WorkflowState`], chained into a cycle with no
//! terminal node:
//!
//! | Transition | Guard |
//! |------------|-------|
//! | red → green | `phase_status == "tests_written"` |
//! | green → refactor | `test_results.tests_passing == true` |
//! | refactor → red | `refactor_status == "completed"` |
//!
//! Guards are named predicates taking the explicit post-action snapshot as
//! their only input, so each is testable in isolation.

use serde_json::json;

use crate::state::WorkflowState;

use super::{ActionSpec, Transition, WorkflowEngine, WorkflowGraph, WorkflowRun};

/// Name of the red phase action.
pub const RED_PHASE: &str = "red_phase";

/// Name of the green phase action.
pub const GREEN_PHASE: &str = "green_phase";

/// Name of the refactor phase action.
pub const REFACTOR_PHASE: &str = "refactor_phase";

fn apply_red_phase(state: &WorkflowState) -> WorkflowState {
    state.update([
        ("test_phase", json!("red")),
        ("phase_status", json!("tests_written")),
        (
            "test_results",
            json!({"tests_written": true, "tests_passing": false}),
        ),
    ])
}

fn apply_green_phase(state: &WorkflowState) -> WorkflowState {
    state.update([
        ("test_phase", json!("green")),
        ("implementation_status", json!("minimal_implementation")),
        (
            "test_results",
            json!({"tests_written": true, "tests_passing": true}),
        ),
    ])
}

fn apply_refactor_phase(state: &WorkflowState) -> WorkflowState {
    state.update([
        ("test_phase", json!("refactor")),
        ("code_quality", json!("improved")),
        ("refactor_status", json!("completed")),
    ])
}

/// Red phase: record that failing tests were written.
pub fn red_phase() -> ActionSpec {
    ActionSpec::new(
        RED_PHASE,
        &["test_phase", "validation_target"],
        &["test_phase", "phase_status", "test_results"],
        apply_red_phase,
    )
}

/// Green phase: record a minimal implementation making tests pass.
pub fn green_phase() -> ActionSpec {
    ActionSpec::new(
        GREEN_PHASE,
        &["test_phase", "test_results"],
        &["test_phase", "implementation_status", "test_results"],
        apply_green_phase,
    )
}

/// Refactor phase: record a quality pass with tests kept green.
pub fn refactor_phase() -> ActionSpec {
    ActionSpec::new(
        REFACTOR_PHASE,
        &["test_phase", "implementation_status"],
        &["test_phase", "code_quality", "refactor_status"],
        apply_refactor_phase,
    )
}

/// Guard for red → green.
pub fn tests_written(state: &WorkflowState) -> bool {
    state.get_str("phase_status") == Some("tests_written")
}

/// Guard for green → refactor.
pub fn tests_passing(state: &WorkflowState) -> bool {
    state
        .get_path("test_results.tests_passing")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

/// Guard for refactor → red.
pub fn refactor_completed(state: &WorkflowState) -> bool {
    state.get_str("refactor_status") == Some("completed")
}

/// The state a TDD run starts from.
pub fn initial_state() -> WorkflowState {
    WorkflowState::new()
        .with("test_phase", json!("start"))
        .with("validation_target", json!("llm_response_quality"))
        .with("iteration", json!(1))
}

/// The three-node cyclic TDD graph, entrypoint at red.
pub fn tdd_graph() -> WorkflowGraph {
    // Constructed directly: the canonical graph is closed over known names,
    // so builder validation has nothing to reject.
    WorkflowGraph {
        actions: vec![red_phase(), green_phase(), refactor_phase()],
        transitions: vec![
            Transition {
                from: RED_PHASE,
                to: GREEN_PHASE,
                guard: tests_written,
            },
            Transition {
                from: GREEN_PHASE,
                to: REFACTOR_PHASE,
                guard: tests_passing,
            },
            Transition {
                from: REFACTOR_PHASE,
                to: RED_PHASE,
                guard: refactor_completed,
            },
        ],
        entrypoint: Some(RED_PHASE),
    }
}

/// Build the canonical TDD workflow on the given engine.
///
/// Returns `None` when the engine is unavailable; the caller decides
/// whether to skip or report.
pub fn build_tdd_workflow(engine: &dyn WorkflowEngine) -> Option<WorkflowRun> {
    engine.build(tdd_graph(), initial_state())
}
