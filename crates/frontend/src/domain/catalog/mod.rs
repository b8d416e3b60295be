//! Generic list screens over [`ResourceKind`](contracts::domain::resource::ResourceKind).

pub mod api;
pub mod columns;
pub mod ui;

pub use ui::ResourceListPage;
