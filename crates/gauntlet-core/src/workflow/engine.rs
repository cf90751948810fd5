//! Workflow engine capability.
//!
//! The engine backing a workflow is optional. Drivers depend on the
//! [`WorkflowEngine`] trait and select an implementation at startup:
//! [`GraphEngine`] when the in-process engine is wanted, [`NoopEngine`]
//! when no engine is available. Building on an absent engine yields an
//! explicit `None`, never a panic, so callers can skip or report.

use tracing::{debug, warn};

use crate::state::WorkflowState;

use super::{WorkflowGraph, WorkflowRun};

/// Capability for turning a graph plus initial state into a runnable workflow.
pub trait WorkflowEngine {
    /// Unique identifier for this engine type.
    ///
    /// Examples: "graph", "noop"
    fn engine_type(&self) -> &'static str;

    /// Whether this engine can actually build workflows.
    fn available(&self) -> bool {
        true
    }

    /// Build a runnable workflow, or `None` when unsupported.
    fn build(&self, graph: WorkflowGraph, initial: WorkflowState) -> Option<WorkflowRun>;
}

/// The in-process engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphEngine;

impl GraphEngine {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowEngine for GraphEngine {
    fn engine_type(&self) -> &'static str {
        "graph"
    }

    fn build(&self, graph: WorkflowGraph, initial: WorkflowState) -> Option<WorkflowRun> {
        match WorkflowRun::new(graph, initial) {
            Ok(run) => {
                debug!(entrypoint = run.current_action(), "workflow built");
                Some(run)
            }
            Err(error) => {
                warn!(%error, "refusing to build workflow from invalid graph");
                None
            }
        }
    }
}

/// Degradation adapter used when no engine is available.
///
/// Every build returns `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEngine;

impl NoopEngine {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowEngine for NoopEngine {
    fn engine_type(&self) -> &'static str {
        "noop"
    }

    fn available(&self) -> bool {
        false
    }

    fn build(&self, _graph: WorkflowGraph, _initial: WorkflowState) -> Option<WorkflowRun> {
        debug!("workflow engine unavailable, returning no workflow");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{ActionSpec, GraphBuilder};

    fn identity(state: &WorkflowState) -> WorkflowState {
        state.clone()
    }

    fn single_node_graph() -> WorkflowGraph {
        GraphBuilder::new()
            .with_action(ActionSpec::new("only", &[], &[], identity))
            .with_entrypoint("only")
            .build()
            .unwrap()
    }

    #[test]
    fn test_graph_engine_builds_valid_graph() {
        let engine = GraphEngine::new();
        assert!(engine.available());

        let run = engine.build(single_node_graph(), WorkflowState::new());
        assert!(run.is_some());
    }

    #[test]
    fn test_graph_engine_degrades_on_invalid_graph() {
        // No entrypoint: structurally invalid, build degrades to None.
        let graph = WorkflowGraph {
            actions: vec![],
            transitions: vec![],
            entrypoint: None,
        };

        let engine = GraphEngine::new();
        assert!(engine.build(graph, WorkflowState::new()).is_none());
    }

    #[test]
    fn test_noop_engine_always_returns_none() {
        let engine = NoopEngine::new();
        assert!(!engine.available());
        assert_eq!(engine.engine_type(), "noop");
        assert!(engine.build(single_node_graph(), WorkflowState::new()).is_none());
    }
}
