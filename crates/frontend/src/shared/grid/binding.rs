//! Controlled / uncontrolled state for grid components.
//!
//! The component always owns a canonical copy of its state. When the parent
//! passes a value and a change handler, every local change is forwarded to
//! the handler and every new parent value is copied in; otherwise the copy
//! is the only state.

use std::fmt;
use std::sync::Arc;

pub type ChangeHandler<S> = Arc<dyn Fn(&S) + Send + Sync>;

pub struct StateBinding<S> {
    current: S,
    on_change: Option<ChangeHandler<S>>,
}

impl<S: Clone + PartialEq> StateBinding<S> {
    pub fn uncontrolled(initial: S) -> Self {
        Self {
            current: initial,
            on_change: None,
        }
    }

    pub fn controlled(initial: S, on_change: impl Fn(&S) + Send + Sync + 'static) -> Self {
        Self {
            current: initial,
            on_change: Some(Arc::new(on_change)),
        }
    }

    pub fn is_controlled(&self) -> bool {
        self.on_change.is_some()
    }

    pub fn get(&self) -> &S {
        &self.current
    }

    /// Applies a local change; notifies the parent if the value changed.
    ///
    /// Returns whether the state changed.
    pub fn apply(&mut self, change: impl FnOnce(&mut S)) -> bool {
        let before = self.current.clone();
        change(&mut self.current);
        let changed = before != self.current;
        if changed {
            if let Some(handler) = &self.on_change {
                handler(&self.current);
            }
        }
        changed
    }

    /// Copies a value pushed down by the parent. Never notifies.
    pub fn sync_from(&mut self, external: S) -> bool {
        if self.current == external {
            return false;
        }
        self.current = external;
        true
    }
}

impl<S: Clone> Clone for StateBinding<S> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for StateBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBinding")
            .field("current", &self.current)
            .field("controlled", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grid::sorting::{SortDirection, SortingState};
    use std::sync::Mutex;

    #[test]
    fn test_uncontrolled_keeps_local_state() {
        let mut binding = StateBinding::uncontrolled(SortingState::new());
        assert!(binding.apply(|s| {
            s.toggle("name", true);
        }));
        assert_eq!(binding.get().direction("name"), Some(SortDirection::Asc));
        assert!(!binding.is_controlled());
    }

    #[test]
    fn test_controlled_forwards_changes_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut binding = StateBinding::controlled(SortingState::new(), move |s: &SortingState| {
            sink.lock().unwrap().push(s.clone())
        });

        binding.apply(|s| {
            s.toggle("name", true);
        });
        binding.apply(|s| {
            s.toggle("actions", false);
        });
        assert_eq!(seen.lock().unwrap().len(), 1);

        // the parent echoes the value back: no second notification
        assert!(!binding.sync_from(SortingState::by("name", SortDirection::Asc)));
        assert!(binding.sync_from(SortingState::by("price", SortDirection::Desc)));
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(binding.get().direction("price"), Some(SortDirection::Desc));
    }

    #[test]
    fn test_both_modes_reach_same_state() {
        let mut local = StateBinding::uncontrolled(SortingState::new());
        let mut controlled = StateBinding::controlled(SortingState::new(), |_: &SortingState| {});
        for binding in [&mut local, &mut controlled] {
            binding.apply(|s| {
                s.toggle("name", true);
                s.toggle("name", true);
            });
        }
        assert_eq!(local.get(), controlled.get());
    }

    #[test]
    fn test_selection_modes_agree() {
        use crate::shared::grid::selection::RowSelection;
        use serde_json::{json, Value};

        let first: Vec<(String, Value)> = vec![
            ("a".into(), json!({ "_id": "a", "name": "Rex" })),
            ("b".into(), json!({ "_id": "b", "name": "Bella" })),
        ];
        let refreshed: Vec<(String, Value)> = vec![
            ("a".into(), json!({ "_id": "a", "name": "Rex II" })),
            ("c".into(), json!({ "_id": "c", "name": "Milo" })),
        ];

        let parent = Arc::new(Mutex::new(RowSelection::new()));
        let sink = parent.clone();
        let mut controlled = StateBinding::controlled(RowSelection::new(), move |s: &RowSelection| {
            *sink.lock().unwrap() = s.clone()
        });
        let mut local = StateBinding::uncontrolled(RowSelection::new());

        for binding in [&mut local, &mut controlled] {
            binding.apply(|s| s.toggle_all(true, &first));
            binding.apply(|s| {
                s.reconcile(&refreshed);
            });
        }
        // the parent echoes its copy back
        let echoed = parent.lock().unwrap().clone();
        assert!(!controlled.sync_from(echoed));

        assert_eq!(local.get(), controlled.get());
        assert_eq!(controlled.get().len(), 2);
        assert_eq!(controlled.get().rows().next().map(|(_, row)| row["name"].clone()), Some(json!("Rex II")));
    }
}
