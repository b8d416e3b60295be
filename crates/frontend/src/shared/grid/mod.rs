//! Headless state of the data grid: column normalisation, row identity,
//! selection, sorting and pagination.
//!
//! Nothing here touches the DOM; the `DataGrid` component in
//! `shared::components::table` renders on top of these types.

pub mod binding;
pub mod column;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod sorting;

use thiserror::Error;

pub use binding::StateBinding;
pub use column::{Accessor, CellTemplate, ColumnCache, ColumnDef, RawColumn, SimpleColumn};
pub use pagination::{PageItem, PaginationState};
pub use row::{default_row_id, value_to_text, RowIdFn};
pub use selection::{CheckboxState, RowSelection, SelectionUpdate};
pub use sorting::{ColumnSort, SortDirection, SortingState};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("column #{0} has no id, accessor key or simple key")]
    MissingColumnId(usize),
    #[error("column id `{0}` is used more than once")]
    DuplicateColumnId(String),
}
