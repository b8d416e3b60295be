pub mod api;
pub mod ui;

pub use ui::{LayoutEditorPage, EDITABLE_PAGES};
