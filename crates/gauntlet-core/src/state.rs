//! Immutable workflow state snapshots.
//!
//! A [`WorkflowState`] is a mapping from string keys to JSON values. It is
//! never mutated in place: [`WorkflowState::update`] returns a fresh snapshot
//! equal to the old one merged with the partial, with the partial winning on
//! key collision. There is no deletion operator.
//!
//! Entries are backed by a `BTreeMap` so iteration order, serialization and
//! Debug output are deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable key/value snapshot threaded through workflow actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowState {
    entries: BTreeMap<String, Value>,
}

impl WorkflowState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this state, adding (or replacing) one entry.
    ///
    /// Chainable constructor for building initial states:
    ///
    /// ```
    /// use gauntlet_core::state::WorkflowState;
    /// use serde_json::json;
    ///
    /// let state = WorkflowState::new()
    ///     .with("test_phase", json!("start"))
    ///     .with("iteration", json!(1));
    /// assert_eq!(state.get_str("test_phase"), Some("start"));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Look up a boolean value by key.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.entries.get(key).and_then(Value::as_bool)
    }

    /// Look up an integer value by key.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.entries.get(key).and_then(Value::as_i64)
    }

    /// Look up a value by dotted path, descending into nested mappings.
    ///
    /// `get_path("test_results.tests_passing")` reads the `tests_passing`
    /// field of the mapping stored under `test_results`. Returns `None` if
    /// any segment is missing or a non-mapping is traversed.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;

        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        Some(current)
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the state has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Return a new state equal to this one merged with `partial`.
    ///
    /// Keys in `partial` win on collision. `self` is not modified.
    pub fn update<I, K, V>(&self, partial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entries = self.entries.clone();
        for (key, value) in partial {
            entries.insert(key.into(), value.into());
        }
        Self { entries }
    }
}

impl From<BTreeMap<String, Value>> for WorkflowState {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for WorkflowState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_update_returns_merged_state() {
        let state = WorkflowState::new().with("a", json!(1)).with("b", json!("x"));
        let updated = state.update([("b", json!("y")), ("c", json!(true))]);

        assert_eq!(updated.get_i64("a"), Some(1));
        assert_eq!(updated.get_str("b"), Some("y"));
        assert_eq!(updated.get_bool("c"), Some(true));
    }

    #[test]
    fn test_update_does_not_mutate_original() {
        let state = WorkflowState::new().with("a", json!(1));
        let snapshot = state.clone();

        let _updated = state.update([("a", json!(2)), ("b", json!(3))]);

        assert_eq!(state, snapshot);
        assert_eq!(state.get_i64("a"), Some(1));
        assert!(!state.contains("b"));
    }

    #[test]
    fn test_get_path_descends_into_mappings() {
        let state = WorkflowState::new()
            .with("test_results", json!({"tests_written": true, "tests_passing": false}));

        assert_eq!(
            state.get_path("test_results.tests_passing"),
            Some(&json!(false))
        );
        assert_eq!(state.get_path("test_results.missing"), None);
        assert_eq!(state.get_path("missing.tests_passing"), None);
    }

    #[test]
    fn test_get_path_rejects_non_mapping_traversal() {
        let state = WorkflowState::new().with("scalar", json!(42));
        assert_eq!(state.get_path("scalar.inner"), None);
        assert_eq!(state.get_path("scalar"), Some(&json!(42)));
    }

    #[test]
    fn test_typed_accessors() {
        let state = WorkflowState::new()
            .with("phase", json!("red"))
            .with("iteration", json!(3))
            .with("done", json!(false));

        assert_eq!(state.get_str("phase"), Some("red"));
        assert_eq!(state.get_i64("iteration"), Some(3));
        assert_eq!(state.get_bool("done"), Some(false));
        assert_eq!(state.get_str("iteration"), None);
        assert_eq!(state.get("absent"), None);
    }

    #[test]
    fn test_from_iterator() {
        let state: WorkflowState = [("a", json!(1)), ("b", json!(2))].into_iter().collect();
        assert_eq!(state.len(), 2);
        assert!(!state.is_empty());
    }

    proptest! {
        #[test]
        fn prop_update_preserves_unrelated_keys(
            base in proptest::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,12}", 0..8),
            partial in proptest::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,12}", 0..4),
        ) {
            let state: WorkflowState = base
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            let updated = state.update(partial.iter().map(|(k, v)| (k.clone(), json!(v))));

            // Partial wins on collision, untouched keys survive unchanged.
            for (key, value) in &partial {
                prop_assert_eq!(updated.get_str(key), Some(value.as_str()));
            }
            for (key, value) in &base {
                if !partial.contains_key(key) {
                    prop_assert_eq!(updated.get_str(key), Some(value.as_str()));
                }
            }

            // The input snapshot is untouched.
            for (key, value) in &base {
                prop_assert_eq!(state.get_str(key), Some(value.as_str()));
            }
            prop_assert_eq!(state.len(), base.len());
        }
    }
}
