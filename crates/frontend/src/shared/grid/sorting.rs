use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use super::column::RawColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

impl ColumnSort {
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Ordered sort criteria. Header clicks keep at most one criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingState(Vec<ColumnSort>);

impl SortingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(id: impl Into<String>, direction: SortDirection) -> Self {
        Self(vec![ColumnSort {
            id: id.into(),
            desc: direction == SortDirection::Desc,
        }])
    }

    pub fn criteria(&self) -> &[ColumnSort] {
        &self.0
    }

    pub fn active(&self) -> Option<&ColumnSort> {
        self.0.first()
    }

    pub fn direction(&self, column_id: &str) -> Option<SortDirection> {
        self.0
            .iter()
            .find(|s| s.id == column_id)
            .map(ColumnSort::direction)
    }

    /// Cycles `column_id` through unsorted → ascending → descending → unsorted.
    /// Clicking a different column starts it ascending and drops the previous one.
    ///
    /// Returns `false` (and changes nothing) when the column is not sortable.
    pub fn toggle(&mut self, column_id: &str, sortable: bool) -> bool {
        if !sortable {
            return false;
        }
        let next = match self.direction(column_id) {
            None => Some(false),
            Some(SortDirection::Asc) => Some(true),
            Some(SortDirection::Desc) => None,
        };
        self.0 = next
            .map(|desc| {
                vec![ColumnSort {
                    id: column_id.to_string(),
                    desc,
                }]
            })
            .unwrap_or_default();
        true
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Header indicator for a column.
pub fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

pub fn sort_class(direction: Option<SortDirection>) -> &'static str {
    if direction.is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Numbers numerically, strings case-insensitively, booleans false < true;
/// nulls sort last regardless of direction handling by the caller.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

/// Stable local sort of the loaded page. Rows without a value stay at the end.
pub fn sort_rows(rows: &mut [(String, Value)], sorting: &SortingState, columns: &[RawColumn]) {
    let Some(active) = sorting.active() else {
        return;
    };
    let Some(column) = columns
        .iter()
        .find(|c| c.resolved_id() == Some(active.id.as_str()))
    else {
        return;
    };

    rows.sort_by(|(_, a), (_, b)| {
        let va = column.value(a);
        let vb = column.value(b);
        match (va.is_null(), vb.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => {
                let cmp = compare_values(&va, &vb);
                if active.desc {
                    cmp.reverse()
                } else {
                    cmp
                }
            }
        }
    });
}
