//! REST API module for the catalog service
//!
//! HTTP endpoints over the catalog core: list/detail per entity type,
//! the disable action, and a deployment-variant gate on creates.

#[cfg(feature = "server")]
pub mod catalog_routes;

#[cfg(feature = "server")]
pub use catalog_routes::{create_catalog_router, AppState};
