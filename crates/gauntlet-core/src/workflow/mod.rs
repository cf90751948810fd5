//! Finite workflow graphs over immutable state.
//!
//! A workflow is a directed graph of named [`ActionSpec`]s chained by
//! guarded [`Transition`]s. Each action is a pure function from a state
//! snapshot to a new state snapshot; each guard is a pure predicate
//! evaluated against the state the action just produced.
//!
//! ## Stepping contract
//!
//! One [`WorkflowRun::step`] applies the current action, records the step
//! in the trace, then scans the action's outgoing transitions **in declared
//! order** and advances to the first whose guard holds. If no guard holds,
//! the state update is kept and the run reports [`WorkflowError::Stalled`].
//!
//! Graphs may be cyclic and have no distinguished terminal node; the
//! canonical red → green → refactor graph in [`actions`] loops forever.

mod engine;

pub mod actions;

pub use engine::{GraphEngine, NoopEngine, WorkflowEngine};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::state::WorkflowState;

/// A pure action: state snapshot in, new state snapshot out.
pub type ApplyFn = fn(&WorkflowState) -> WorkflowState;

/// A pure transition guard over the post-action state.
pub type GuardFn = fn(&WorkflowState) -> bool;

/// Errors from graph construction and stepping.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Duplicate action: {0}")]
    DuplicateAction(String),

    #[error("Transition references unknown action: {0}")]
    UnknownAction(String),

    #[error("No entrypoint declared")]
    MissingEntrypoint,

    #[error("Entrypoint is not a declared action: {0}")]
    UnknownEntrypoint(String),

    #[error("No transition guard matched after action: {0}")]
    Stalled(String),
}

/// A named action with its declared read/write key sets.
///
/// The key sets are declarative documentation of what the action touches.
/// They are not enforced at apply time; tests assert they stay honest.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    name: &'static str,
    reads: &'static [&'static str],
    writes: &'static [&'static str],
    apply: ApplyFn,
}

impl ActionSpec {
    /// Declare an action.
    pub fn new(
        name: &'static str,
        reads: &'static [&'static str],
        writes: &'static [&'static str],
        apply: ApplyFn,
    ) -> Self {
        Self {
            name,
            reads,
            writes,
            apply,
        }
    }

    /// The action's unique name within a graph.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Keys this action declares it reads.
    pub fn reads(&self) -> &'static [&'static str] {
        self.reads
    }

    /// Keys this action declares it writes.
    pub fn writes(&self) -> &'static [&'static str] {
        self.writes
    }

    /// Apply the action to a state snapshot, producing a new snapshot.
    pub fn apply(&self, state: &WorkflowState) -> WorkflowState {
        (self.apply)(state)
    }
}

/// A guarded edge between two actions.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    from: &'static str,
    to: &'static str,
    guard: GuardFn,
}

impl Transition {
    /// Source action name.
    pub fn from(&self) -> &'static str {
        self.from
    }

    /// Destination action name.
    pub fn to(&self) -> &'static str {
        self.to
    }

    /// Evaluate the guard against a post-action state.
    pub fn holds(&self, state: &WorkflowState) -> bool {
        (self.guard)(state)
    }
}

/// Builder for workflow graphs.
///
/// ```
/// use gauntlet_core::workflow::{actions, GraphBuilder};
///
/// let graph = GraphBuilder::new()
///     .with_action(actions::red_phase())
///     .with_action(actions::green_phase())
///     .with_transition(actions::RED_PHASE, actions::GREEN_PHASE, actions::tests_written)
///     .with_entrypoint(actions::RED_PHASE)
///     .build()
///     .unwrap();
/// assert_eq!(graph.entrypoint(), Some(actions::RED_PHASE));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    actions: Vec<ActionSpec>,
    transitions: Vec<Transition>,
    entrypoint: Option<&'static str>,
}

impl GraphBuilder {
    /// Start an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action node.
    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.actions.push(action);
        self
    }

    /// Add a guarded transition. Declaration order is match order.
    pub fn with_transition(
        mut self,
        from: &'static str,
        to: &'static str,
        guard: GuardFn,
    ) -> Self {
        self.transitions.push(Transition { from, to, guard });
        self
    }

    /// Set the action the run starts at.
    pub fn with_entrypoint(mut self, name: &'static str) -> Self {
        self.entrypoint = Some(name);
        self
    }

    /// Validate and produce the graph.
    pub fn build(self) -> Result<WorkflowGraph, WorkflowError> {
        let graph = WorkflowGraph {
            actions: self.actions,
            transitions: self.transitions,
            entrypoint: self.entrypoint,
        };
        graph.validate()?;
        Ok(graph)
    }
}

/// A validated (or validatable) workflow graph.
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    actions: Vec<ActionSpec>,
    transitions: Vec<Transition>,
    entrypoint: Option<&'static str>,
}

impl WorkflowGraph {
    /// The declared actions, in declaration order.
    pub fn actions(&self) -> &[ActionSpec] {
        &self.actions
    }

    /// The declared transitions, in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The declared entrypoint, if any.
    pub fn entrypoint(&self) -> Option<&'static str> {
        self.entrypoint
    }

    /// Look up an action by name.
    pub fn action(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.name == name)
    }

    fn action_index(&self, name: &str) -> Option<usize> {
        self.actions.iter().position(|a| a.name == name)
    }

    /// Check structural integrity: unique action names, transitions only
    /// between declared actions, a declared and known entrypoint.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let mut seen = std::collections::HashSet::new();
        for action in &self.actions {
            if !seen.insert(action.name) {
                return Err(WorkflowError::DuplicateAction(action.name.to_string()));
            }
        }

        for transition in &self.transitions {
            for endpoint in [transition.from, transition.to] {
                if self.action(endpoint).is_none() {
                    return Err(WorkflowError::UnknownAction(endpoint.to_string()));
                }
            }
        }

        let entrypoint = self.entrypoint.ok_or(WorkflowError::MissingEntrypoint)?;
        if self.action(entrypoint).is_none() {
            return Err(WorkflowError::UnknownEntrypoint(entrypoint.to_string()));
        }

        Ok(())
    }
}

/// One applied action in a run's trace.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// The action that was applied.
    pub action: &'static str,

    /// When it was applied.
    pub at: DateTime<Utc>,
}

/// A stepping workflow: a graph, a cursor, and the threaded state.
#[derive(Debug)]
pub struct WorkflowRun {
    graph: WorkflowGraph,
    current: usize,
    state: WorkflowState,
    trace: Vec<StepRecord>,
}

impl WorkflowRun {
    /// Start a run at the graph's entrypoint with the given initial state.
    pub fn new(graph: WorkflowGraph, initial: WorkflowState) -> Result<Self, WorkflowError> {
        graph.validate()?;

        let entrypoint = graph.entrypoint.ok_or(WorkflowError::MissingEntrypoint)?;
        let current = graph
            .action_index(entrypoint)
            .ok_or_else(|| WorkflowError::UnknownEntrypoint(entrypoint.to_string()))?;

        Ok(Self {
            graph,
            current,
            state: initial,
            trace: Vec::new(),
        })
    }

    /// The current state snapshot.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The action the next `step` will apply.
    pub fn current_action(&self) -> &'static str {
        self.graph.actions[self.current].name
    }

    /// Applied actions so far, oldest first.
    pub fn trace(&self) -> &[StepRecord] {
        &self.trace
    }

    /// Apply the current action and advance along the first transition
    /// whose guard holds against the new state.
    ///
    /// On [`WorkflowError::Stalled`] the action's state update is kept;
    /// only the cursor stays where it was.
    pub fn step(&mut self) -> Result<&WorkflowState, WorkflowError> {
        let action = self.graph.actions[self.current];

        self.state = action.apply(&self.state);
        self.trace.push(StepRecord {
            action: action.name(),
            at: Utc::now(),
        });

        let next = self
            .graph
            .transitions
            .iter()
            .find(|t| t.from == action.name() && t.holds(&self.state))
            .map(Transition::to);

        match next {
            Some(to) => {
                // Destination is a declared action: validated at build time.
                if let Some(index) = self.graph.action_index(to) {
                    debug!(from = action.name(), to, "workflow step");
                    self.current = index;
                    Ok(&self.state)
                } else {
                    Err(WorkflowError::UnknownAction(to.to_string()))
                }
            }
            None => Err(WorkflowError::Stalled(action.name().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mark(state: &WorkflowState) -> WorkflowState {
        state.update([("marked", json!(true))])
    }

    fn clear(state: &WorkflowState) -> WorkflowState {
        state.update([("marked", json!(false))])
    }

    fn always(_: &WorkflowState) -> bool {
        true
    }

    fn never(_: &WorkflowState) -> bool {
        false
    }

    fn action_a() -> ActionSpec {
        ActionSpec::new("a", &[], &["marked"], mark)
    }

    fn action_b() -> ActionSpec {
        ActionSpec::new("b", &[], &["marked"], clear)
    }

    #[test]
    fn test_build_rejects_unknown_transition_endpoint() {
        let result = GraphBuilder::new()
            .with_action(action_a())
            .with_transition("a", "ghost", always)
            .with_entrypoint("a")
            .build();

        assert!(matches!(result, Err(WorkflowError::UnknownAction(name)) if name == "ghost"));
    }

    #[test]
    fn test_build_rejects_missing_entrypoint() {
        let result = GraphBuilder::new().with_action(action_a()).build();
        assert!(matches!(result, Err(WorkflowError::MissingEntrypoint)));
    }

    #[test]
    fn test_build_rejects_unknown_entrypoint() {
        let result = GraphBuilder::new()
            .with_action(action_a())
            .with_entrypoint("ghost")
            .build();

        assert!(matches!(result, Err(WorkflowError::UnknownEntrypoint(name)) if name == "ghost"));
    }

    #[test]
    fn test_build_rejects_duplicate_actions() {
        let result = GraphBuilder::new()
            .with_action(action_a())
            .with_action(action_a())
            .with_entrypoint("a")
            .build();

        assert!(matches!(result, Err(WorkflowError::DuplicateAction(name)) if name == "a"));
    }

    #[test]
    fn test_step_applies_action_and_advances() {
        let graph = GraphBuilder::new()
            .with_action(action_a())
            .with_action(action_b())
            .with_transition("a", "b", always)
            .with_transition("b", "a", always)
            .with_entrypoint("a")
            .build()
            .unwrap();

        let mut run = WorkflowRun::new(graph, WorkflowState::new()).unwrap();
        assert_eq!(run.current_action(), "a");

        let state = run.step().unwrap();
        assert_eq!(state.get_bool("marked"), Some(true));
        assert_eq!(run.current_action(), "b");

        run.step().unwrap();
        assert_eq!(run.state().get_bool("marked"), Some(false));
        assert_eq!(run.current_action(), "a");
    }

    #[test]
    fn test_step_stalls_when_no_guard_matches() {
        let graph = GraphBuilder::new()
            .with_action(action_a())
            .with_action(action_b())
            .with_transition("a", "b", never)
            .with_entrypoint("a")
            .build()
            .unwrap();

        let mut run = WorkflowRun::new(graph, WorkflowState::new()).unwrap();
        let result = run.step();

        assert!(matches!(result, Err(WorkflowError::Stalled(name)) if name == "a"));
        // The state update from the action is kept, the cursor is not moved.
        assert_eq!(run.state().get_bool("marked"), Some(true));
        assert_eq!(run.current_action(), "a");
    }

    #[test]
    fn test_first_declared_matching_transition_wins() {
        let graph = GraphBuilder::new()
            .with_action(action_a())
            .with_action(action_b())
            .with_transition("a", "a", always)
            .with_transition("a", "b", always)
            .with_entrypoint("a")
            .build()
            .unwrap();

        let mut run = WorkflowRun::new(graph, WorkflowState::new()).unwrap();
        run.step().unwrap();

        assert_eq!(run.current_action(), "a");
    }

    #[test]
    fn test_trace_records_applied_actions_in_order() {
        let graph = GraphBuilder::new()
            .with_action(action_a())
            .with_action(action_b())
            .with_transition("a", "b", always)
            .with_transition("b", "a", always)
            .with_entrypoint("a")
            .build()
            .unwrap();

        let mut run = WorkflowRun::new(graph, WorkflowState::new()).unwrap();
        run.step().unwrap();
        run.step().unwrap();
        run.step().unwrap();

        let names: Vec<_> = run.trace().iter().map(|r| r.action).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }
}
