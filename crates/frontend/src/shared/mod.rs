pub mod api;
pub mod components;
pub mod date_utils;
pub mod grid;
pub mod icons;
pub mod reorder;
pub mod resource;
pub mod secure_storage;
pub mod toast;
