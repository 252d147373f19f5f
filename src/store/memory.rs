//! In-memory entity store
//!
//! Vectors behind a tokio RwLock, insertion order preserved so creation-order
//! listing falls out naturally. The name-uniqueness check here mirrors the
//! unique constraint the relational schema carries: the store stays the final
//! authority even when a caller skips the validation pre-check.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::filter::{ActiveFilter, ArticleFilter, ProductFilter};
use crate::models::{ArticleRow, CategoryRow, ProductRow};
use crate::store::CatalogStore;

#[derive(Default)]
struct Collections {
    categories: Vec<CategoryRow>,
    products: Vec<ProductRow>,
    articles: Vec<ArticleRow>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_category(&self, row: CategoryRow) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.categories.iter().any(|c| c.name == row.name) {
            return Err(CatalogError::DuplicateKey {
                entity: "Category",
                name: row.name,
            });
        }
        inner.categories.push(row);
        Ok(())
    }

    async fn category(&self, id: Uuid) -> Result<Option<CategoryRow>> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn category_by_name(&self, name: &str) -> Result<Option<CategoryRow>> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn categories(&self, filter: ActiveFilter) -> Result<Vec<CategoryRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .categories
            .iter()
            .filter(|c| filter.matches_category(c))
            .cloned()
            .collect())
    }

    async fn set_category_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.categories.iter_mut().find(|c| c.id == id) {
            Some(row) => {
                row.active = active;
                row.date_updated = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_product(&self, row: ProductRow) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.products.iter().any(|p| p.name == row.name) {
            return Err(CatalogError::DuplicateKey {
                entity: "Product",
                name: row.name,
            });
        }
        if !inner.categories.iter().any(|c| c.id == row.category_id) {
            return Err(CatalogError::Store(anyhow::anyhow!(
                "foreign key violation: category {} does not exist",
                row.category_id
            )));
        }
        inner.products.push(row);
        Ok(())
    }

    async fn product(&self, id: Uuid) -> Result<Option<ProductRow>> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn product_by_name(&self, name: &str) -> Result<Option<ProductRow>> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.name == name).cloned())
    }

    async fn products(&self, filter: ProductFilter) -> Result<Vec<ProductRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn set_product_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.products.iter_mut().find(|p| p.id == id) {
            Some(row) => {
                row.active = active;
                row.date_updated = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_article(&self, row: ArticleRow) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.articles.iter().any(|a| a.name == row.name) {
            return Err(CatalogError::DuplicateKey {
                entity: "Article",
                name: row.name,
            });
        }
        if !inner.products.iter().any(|p| p.id == row.product_id) {
            return Err(CatalogError::Store(anyhow::anyhow!(
                "foreign key violation: product {} does not exist",
                row.product_id
            )));
        }
        inner.articles.push(row);
        Ok(())
    }

    async fn article(&self, id: Uuid) -> Result<Option<ArticleRow>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn article_by_name(&self, name: &str) -> Result<Option<ArticleRow>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.iter().find(|a| a.name == name).cloned())
    }

    async fn articles(&self, filter: ArticleFilter) -> Result<Vec<ArticleRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .articles
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn set_article_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.articles.iter_mut().find(|a| a.id == id) {
            Some(row) => {
                row.active = active;
                row.date_updated = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
