pub mod catalog;
pub mod layout_config;
