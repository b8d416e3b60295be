pub mod page_section;
pub mod resource;
