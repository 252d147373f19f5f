//! Shop catalog core
//!
//! Hierarchical catalog model (Category → Product → Article) with uniform
//! active-state filtering, nested list/detail projections, create-time
//! validation rules and an explicit disable lifecycle action.
//!
//! All reads flow store → filter → projection; writes are gated by the
//! validation rules engine before a single store call persists them.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use shop_catalog::{CatalogService, MemoryStore, NewCategoryFields};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> shop_catalog::Result<()> {
//! let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
//! let fruits = catalog
//!     .create_category(NewCategoryFields {
//!         name: "Fruits".to_string(),
//!         description: "Fruits frais".to_string(),
//!         active: Some(true),
//!     })
//!     .await?;
//! assert!(fruits.active);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Entity records
pub mod models;

// Active-state filtering
pub mod filter;

// List/detail projection shapes
pub mod projection;

// Create-time validation rules
pub mod validation;

// Entity store seam and implementations
pub mod store;

// Operations surface
pub mod catalog;

// REST API (when the server feature is enabled)
pub mod api;

pub use catalog::CatalogService;
pub use error::{CatalogError, Result};
pub use filter::{ActiveFilter, ArticleFilter, ListParams, ProductFilter};
pub use models::{
    ArticleRow, CategoryRow, NewArticleFields, NewCategoryFields, NewProductFields, ProductRow,
};
pub use projection::{
    ArticleList, ArticleRich, CategoryDetail, CategoryList, ProductDetail, ProductList,
};
pub use store::{CatalogStore, MemoryStore};

#[cfg(feature = "database")]
pub use store::PgCatalogStore;
