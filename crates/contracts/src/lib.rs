//! Types shared between the backend API and the web frontend.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
