//! Drag-and-drop reordering of page sections.

pub mod editor;
pub mod section_order;

pub use editor::SectionReorderEditor;
pub use section_order::{array_move, DragState, ReorderError, SectionOrder};
