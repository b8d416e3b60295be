//! Wire contracts shared between the admin front-end and the Pet Caart REST API.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
