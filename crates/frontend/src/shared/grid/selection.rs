//! Row selection that survives pagination.
//!
//! The selection keeps the full row object for every selected id, so rows
//! picked on earlier pages are still available (e.g. for bulk actions) after
//! they leave the loaded page. "Select all" only ever touches visible rows.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Header checkbox state over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Bulk update coming from a header control or a parent component.
pub enum SelectionUpdate {
    /// Ids with their row objects; replaces the selection.
    Rows(BTreeMap<String, Value>),
    /// Id flags; `false` entries are dropped.
    Flags(BTreeMap<String, bool>),
    /// Computes the next flags from the current ones.
    Updater(Box<dyn FnOnce(&BTreeMap<String, bool>) -> BTreeMap<String, bool>>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSelection {
    rows: BTreeMap<String, Value>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    pub fn ids(&self) -> BTreeSet<String> {
        self.rows.keys().cloned().collect()
    }

    /// Stored row objects, including rows no longer on the current page.
    pub fn rows(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.rows.iter()
    }

    pub fn selected_rows(&self) -> Vec<Value> {
        self.rows.values().cloned().collect()
    }

    /// `id -> true` view, the shape table libraries exchange.
    pub fn flags(&self) -> BTreeMap<String, bool> {
        self.rows.keys().map(|id| (id.clone(), true)).collect()
    }

    /// Flips membership of one row.
    pub fn toggle_row(&mut self, id: &str, row: &Value) {
        if self.rows.remove(id).is_none() {
            self.rows.insert(id.to_string(), row.clone());
        }
    }

    /// Sets membership of one row explicitly (checkbox `change` events).
    pub fn set_row(&mut self, id: &str, row: &Value, checked: bool) {
        if checked {
            self.rows.insert(id.to_string(), row.clone());
        } else {
            self.rows.remove(id);
        }
    }

    /// Checks or unchecks every visible row; rows from other pages are kept.
    pub fn toggle_all(&mut self, checked: bool, visible: &[(String, Value)]) {
        for (id, row) in visible {
            if checked {
                self.rows.insert(id.clone(), row.clone());
            } else {
                self.rows.remove(id);
            }
        }
    }

    /// Replaces the selection. Row objects for flagged ids come from the
    /// visible page first, then from the previous selection; unknown ids are
    /// stored with a `null` row.
    pub fn set_selection(&mut self, update: SelectionUpdate, visible: &[(String, Value)]) {
        let flags = match update {
            SelectionUpdate::Rows(rows) => {
                self.rows = rows;
                return;
            }
            SelectionUpdate::Flags(flags) => flags,
            SelectionUpdate::Updater(f) => f(&self.flags()),
        };

        let mut next = BTreeMap::new();
        for (id, checked) in flags {
            if !checked {
                continue;
            }
            let row = visible
                .iter()
                .find(|(vid, _)| *vid == id)
                .map(|(_, row)| row.clone())
                .or_else(|| self.rows.get(&id).cloned())
                .unwrap_or(Value::Null);
            next.insert(id, row);
        }
        self.rows = next;
    }

    /// Refreshes stored row objects for selected ids present in `visible`.
    /// Selected ids missing from the page stay selected with their old row.
    ///
    /// Returns `true` if any stored row changed.
    pub fn reconcile(&mut self, visible: &[(String, Value)]) -> bool {
        let mut changed = false;
        for (id, row) in visible {
            if let Some(stored) = self.rows.get_mut(id) {
                if stored != row {
                    *stored = row.clone();
                    changed = true;
                }
            }
        }
        changed
    }

    /// Tri-state over the visible rows only.
    pub fn header_state<'a>(&self, visible_ids: impl IntoIterator<Item = &'a str>) -> CheckboxState {
        let mut total = 0;
        let mut selected = 0;
        for id in visible_ids {
            total += 1;
            if self.rows.contains_key(id) {
                selected += 1;
            }
        }
        if total == 0 || selected == 0 {
            CheckboxState::Unchecked
        } else if selected == total {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(ids: &[&str]) -> Vec<(String, Value)> {
        ids.iter()
            .map(|id| (id.to_string(), json!({ "_id": id, "name": format!("row {}", id) })))
            .collect()
    }

    fn ids(sel: &RowSelection) -> Vec<String> {
        sel.ids().into_iter().collect()
    }

    fn visible_ids(rows: &[(String, Value)]) -> Vec<&str> {
        rows.iter().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn test_toggle_row() {
        let mut sel = RowSelection::new();
        let row = json!({ "_id": "r1" });
        sel.toggle_row("r1", &row);
        assert!(sel.is_selected("r1"));
        sel.toggle_row("r1", &row);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_is_page_scoped() {
        let mut sel = RowSelection::new();
        sel.toggle_row("r9", &json!({ "_id": "r9" }));

        let current = page(&["r1", "r2", "r3", "r4", "r5"]);
        assert_eq!(sel.header_state(visible_ids(&current)), CheckboxState::Unchecked);

        sel.toggle_all(true, &current);
        assert_eq!(ids(&sel), vec!["r1", "r2", "r3", "r4", "r5", "r9"]);
        assert_eq!(sel.header_state(visible_ids(&current)), CheckboxState::Checked);

        sel.toggle_all(false, &current);
        assert_eq!(ids(&sel), vec!["r9"]);
    }

    #[test]
    fn test_indeterminate_when_part_of_page_selected() {
        let mut sel = RowSelection::new();
        let current = page(&["r1", "r2", "r3"]);
        sel.set_row("r2", &current[1].1, true);
        assert_eq!(sel.header_state(visible_ids(&current)), CheckboxState::Indeterminate);
        assert_eq!(sel.header_state(Vec::<&str>::new()), CheckboxState::Unchecked);
    }

    #[test]
    fn test_reconcile_updates_visible_and_keeps_hidden() {
        let mut sel = RowSelection::new();
        sel.set_row("r1", &json!({ "_id": "r1", "stock": 3 }), true);
        sel.set_row("r9", &json!({ "_id": "r9", "stock": 1 }), true);

        let refreshed = vec![("r1".to_string(), json!({ "_id": "r1", "stock": 0 }))];
        assert!(sel.reconcile(&refreshed));
        assert!(!sel.reconcile(&refreshed));

        let rows: BTreeMap<_, _> = sel.rows().map(|(k, v)| (k.clone(), v.clone())).collect();
        assert_eq!(rows["r1"]["stock"], json!(0));
        assert_eq!(rows["r9"]["stock"], json!(1));
    }

    #[test]
    fn test_set_selection_from_flags_and_updater() {
        let current = page(&["r1", "r2"]);
        let mut sel = RowSelection::new();
        sel.set_row("r7", &json!({ "_id": "r7" }), true);

        let flags = BTreeMap::from([
            ("r1".to_string(), true),
            ("r2".to_string(), false),
            ("r7".to_string(), true),
            ("r8".to_string(), true),
        ]);
        sel.set_selection(SelectionUpdate::Flags(flags), &current);
        assert_eq!(ids(&sel), vec!["r1", "r7", "r8"]);
        let rows: BTreeMap<_, _> = sel.rows().map(|(k, v)| (k.clone(), v.clone())).collect();
        assert_eq!(rows["r1"]["name"], json!("row r1"));
        assert_eq!(rows["r7"], json!({ "_id": "r7" }));
        assert_eq!(rows["r8"], Value::Null);

        sel.set_selection(
            SelectionUpdate::Updater(Box::new(|prev| {
                prev.iter()
                    .filter(|(id, _)| id.as_str() != "r8")
                    .map(|(id, v)| (id.clone(), *v))
                    .collect()
            })),
            &current,
        );
        assert_eq!(ids(&sel), vec!["r1", "r7"]);

        sel.set_selection(SelectionUpdate::Rows(BTreeMap::new()), &current);
        assert!(sel.is_empty());
    }
}
