//! Entity Store
//!
//! The catalog consumes each entity collection through this seam: equality
//! filters, existence checks and single-record atomic writes. The in-memory
//! store backs the test suite and database-less deployments; the Postgres
//! store (behind the `database` feature) is the production path.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::filter::{ActiveFilter, ArticleFilter, ProductFilter};
use crate::models::{ArticleRow, CategoryRow, ProductRow};

pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "database")]
pub use postgres::PgCatalogStore;

/// Queryable, filterable collection per entity type.
///
/// Lists return rows in creation order (oldest first); that ordering is part
/// of the projection contract, not a display nicety. `set_*_active` returns
/// whether a row was touched, so callers can distinguish missing records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_category(&self, row: CategoryRow) -> Result<()>;
    async fn category(&self, id: Uuid) -> Result<Option<CategoryRow>>;
    async fn category_by_name(&self, name: &str) -> Result<Option<CategoryRow>>;
    async fn categories(&self, filter: ActiveFilter) -> Result<Vec<CategoryRow>>;
    async fn set_category_active(&self, id: Uuid, active: bool) -> Result<bool>;

    async fn insert_product(&self, row: ProductRow) -> Result<()>;
    async fn product(&self, id: Uuid) -> Result<Option<ProductRow>>;
    async fn product_by_name(&self, name: &str) -> Result<Option<ProductRow>>;
    async fn products(&self, filter: ProductFilter) -> Result<Vec<ProductRow>>;
    async fn set_product_active(&self, id: Uuid, active: bool) -> Result<bool>;

    async fn insert_article(&self, row: ArticleRow) -> Result<()>;
    async fn article(&self, id: Uuid) -> Result<Option<ArticleRow>>;
    async fn article_by_name(&self, name: &str) -> Result<Option<ArticleRow>>;
    async fn articles(&self, filter: ArticleFilter) -> Result<Vec<ArticleRow>>;
    async fn set_article_active(&self, id: Uuid, active: bool) -> Result<bool>;
}
