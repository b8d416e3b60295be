//! Column descriptors.
//!
//! Screens describe columns either in the short [`SimpleColumn`] form
//! (`key` + `label` + optional renderer) or directly as a [`RawColumn`], the
//! form the grid renders from. [`normalize_column`] turns any descriptor into
//! a `RawColumn`; raw columns pass through untouched.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::row::{lookup, value_to_text};
use super::GridError;

/// `(cell value, whole row) -> text`.
pub type CellRenderer = Arc<dyn Fn(&Value, &Value) -> String + Send + Sync>;
/// Derives a cell value from the whole row.
pub type AccessorFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

#[derive(Clone)]
pub enum Accessor {
    Key(String),
    Fn(AccessorFn),
}

impl PartialEq for Accessor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Accessor::Key(a), Accessor::Key(b)) => a == b,
            (Accessor::Fn(a), Accessor::Fn(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(k) => f.debug_tuple("Key").field(k).finish(),
            Accessor::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

#[derive(Clone)]
pub enum CellTemplate {
    /// Render the value as plain text.
    Text,
    Render(CellRenderer),
}

impl PartialEq for CellTemplate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellTemplate::Text, CellTemplate::Text) => true,
            (CellTemplate::Render(a), CellTemplate::Render(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for CellTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellTemplate::Text => f.write_str("Text"),
            CellTemplate::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// Short form: a row field plus a header label.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleColumn {
    pub key: String,
    pub label: String,
    pub render: Option<CellTemplate>,
    pub enable_sorting: Option<bool>,
}

impl SimpleColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: None,
            enable_sorting: None,
        }
    }

    pub fn render(
        mut self,
        render: impl Fn(&Value, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(CellTemplate::Render(Arc::new(render)));
        self
    }

    pub fn sortable(mut self, enabled: bool) -> Self {
        self.enable_sorting = Some(enabled);
        self
    }
}

/// The form the grid renders from.
#[derive(Clone, Debug, PartialEq)]
pub struct RawColumn {
    pub id: Option<String>,
    pub accessor: Option<Accessor>,
    pub header: String,
    pub enable_sorting: bool,
    pub cell: CellTemplate,
}

impl RawColumn {
    pub fn accessor_key(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: None,
            accessor: Some(Accessor::Key(key.into())),
            header: header.into(),
            enable_sorting: true,
            cell: CellTemplate::Text,
        }
    }

    pub fn accessor_fn(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: Some(id.into()),
            accessor: Some(Accessor::Fn(Arc::new(accessor))),
            header: header.into(),
            enable_sorting: true,
            cell: CellTemplate::Text,
        }
    }

    /// Display-only column (actions, thumbnails) with no backing field.
    pub fn display(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            accessor: None,
            header: header.into(),
            enable_sorting: false,
            cell: CellTemplate::Text,
        }
    }

    pub fn with_cell(
        mut self,
        render: impl Fn(&Value, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.cell = CellTemplate::Render(Arc::new(render));
        self
    }

    pub fn sortable(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Explicit id, else the accessor key.
    pub fn resolved_id(&self) -> Option<&str> {
        self.id.as_deref().or(match &self.accessor {
            Some(Accessor::Key(k)) => Some(k.as_str()),
            _ => None,
        })
    }

    pub fn can_sort(&self) -> bool {
        self.enable_sorting && self.accessor.is_some()
    }

    pub fn value(&self, row: &Value) -> Value {
        match &self.accessor {
            Some(Accessor::Key(key)) => lookup(row, key).cloned().unwrap_or(Value::Null),
            Some(Accessor::Fn(f)) => f(row),
            None => Value::Null,
        }
    }

    pub fn render(&self, row: &Value) -> String {
        let value = self.value(row);
        match &self.cell {
            CellTemplate::Text => value_to_text(&value),
            CellTemplate::Render(f) => f(&value, row),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnDef {
    Simple(SimpleColumn),
    Raw(RawColumn),
}

impl From<SimpleColumn> for ColumnDef {
    fn from(column: SimpleColumn) -> Self {
        ColumnDef::Simple(column)
    }
}

impl From<RawColumn> for ColumnDef {
    fn from(column: RawColumn) -> Self {
        ColumnDef::Raw(column)
    }
}

/// Converts a descriptor into the render form.
///
/// A simple column with an empty key cannot be resolved; it comes out without
/// id or accessor and is rejected by [`validate_columns`].
pub fn normalize_column(def: &ColumnDef) -> RawColumn {
    match def {
        ColumnDef::Raw(raw) => raw.clone(),
        ColumnDef::Simple(simple) => {
            let key = simple.key.trim();
            let resolvable = !key.is_empty();
            RawColumn {
                id: resolvable.then(|| key.to_string()),
                accessor: resolvable.then(|| Accessor::Key(key.to_string())),
                header: simple.label.clone(),
                enable_sorting: simple.enable_sorting.unwrap_or(true),
                cell: simple.render.clone().unwrap_or(CellTemplate::Text),
            }
        }
    }
}

pub fn normalize_columns(defs: &[ColumnDef]) -> Vec<RawColumn> {
    defs.iter().map(normalize_column).collect()
}

/// Every column needs an id, unique within the set.
pub fn validate_columns(columns: &[RawColumn]) -> Result<(), GridError> {
    let mut seen = HashSet::new();
    for (index, column) in columns.iter().enumerate() {
        let id = column
            .resolved_id()
            .ok_or(GridError::MissingColumnId(index))?;
        if !seen.insert(id) {
            return Err(GridError::DuplicateColumnId(id.to_string()));
        }
    }
    Ok(())
}

/// Memoises normalisation by identity of the source slice, so re-renders
/// with the same `Arc` reuse the normalised columns.
pub struct ColumnCache {
    source: Option<Arc<[ColumnDef]>>,
    normalized: Arc<[RawColumn]>,
}

impl ColumnCache {
    pub fn new() -> Self {
        Self {
            source: None,
            normalized: Arc::from(Vec::new()),
        }
    }

    pub fn normalize(&mut self, source: &Arc<[ColumnDef]>) -> Arc<[RawColumn]> {
        if let Some(previous) = &self.source {
            if Arc::ptr_eq(previous, source) {
                return self.normalized.clone();
            }
        }
        let normalized: Arc<[RawColumn]> = normalize_columns(source).into();
        if let Err(e) = validate_columns(&normalized) {
            log::warn!("Data grid columns are invalid: {}", e);
        }
        self.source = Some(source.clone());
        self.normalized = normalized.clone();
        normalized
    }
}

impl Default for ColumnCache {
    fn default() -> Self {
        Self::new()
    }
}
