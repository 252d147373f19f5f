//! Catalog operations surface
//!
//! Ties the store, the active-state filter, the projection builder and the
//! validation rules together. Reads never mutate; writes are fully validated
//! before the single store call that persists them.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::filter::{ArticleFilter, ListParams, ProductFilter};
use crate::models::{
    ArticleRow, CategoryRow, NewArticleFields, NewCategoryFields, NewProductFields, ProductRow,
};
use crate::projection::{
    self, ArticleRich, CategoryDetail, CategoryList, ProductDetail, ProductList,
};
use crate::store::CatalogStore;
use crate::validation;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    // ------------------------------------------------------------------
    // Creates (validated)
    // ------------------------------------------------------------------

    pub async fn create_category(&self, fields: NewCategoryFields) -> Result<CategoryRow> {
        validation::validate_new_category(self.store.as_ref(), &fields).await?;
        let row = CategoryRow::from_fields(&fields);
        self.store.insert_category(row.clone()).await?;
        info!("Created Category {} '{}'", row.id, row.name);
        Ok(row)
    }

    pub async fn create_product(&self, fields: NewProductFields) -> Result<ProductRow> {
        validation::validate_new_product(self.store.as_ref(), &fields).await?;
        let row = ProductRow::from_fields(&fields);
        self.store.insert_product(row.clone()).await?;
        info!("Created Product {} '{}'", row.id, row.name);
        Ok(row)
    }

    pub async fn create_article(&self, fields: NewArticleFields) -> Result<ArticleRow> {
        validation::validate_new_article(self.store.as_ref(), &fields).await?;
        let row = ArticleRow::from_fields(&fields);
        self.store.insert_article(row.clone()).await?;
        info!("Created Article {} '{}'", row.id, row.name);
        Ok(row)
    }

    // ------------------------------------------------------------------
    // List projections
    // ------------------------------------------------------------------

    pub async fn list_categories(&self, params: &ListParams) -> Result<Vec<CategoryList>> {
        let rows = self.store.categories(params.active_filter()).await?;
        Ok(rows.iter().map(projection::category_list).collect())
    }

    pub async fn list_products(&self, params: &ListParams) -> Result<Vec<ProductList>> {
        let rows = self.store.products(params.product_filter()).await?;
        Ok(rows.iter().map(projection::product_list).collect())
    }

    /// Article listing uses the rich projection: ownership chain flattened
    /// through a read-time join, never duplicated in stored state.
    pub async fn list_articles(&self, params: &ListParams) -> Result<Vec<ArticleRich>> {
        let rows = self.store.articles(params.article_filter()).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(self.join_article(row).await?);
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Detail projections
    // ------------------------------------------------------------------

    pub async fn category_detail(&self, id: Uuid) -> Result<CategoryDetail> {
        let category = self
            .store
            .category(id)
            .await?
            .ok_or(CatalogError::not_found("Category", id))?;
        let products = self
            .store
            .products(ProductFilter::active_of_category(id))
            .await?;
        let mut details = Vec::with_capacity(products.len());
        for product in &products {
            details.push(self.expand_product(product).await?);
        }
        Ok(projection::category_detail(&category, details))
    }

    pub async fn product_detail(&self, id: Uuid) -> Result<ProductDetail> {
        let product = self
            .store
            .product(id)
            .await?
            .ok_or(CatalogError::not_found("Product", id))?;
        self.expand_product(&product).await
    }

    pub async fn article_detail(&self, id: Uuid) -> Result<ArticleRich> {
        let article = self
            .store
            .article(id)
            .await?
            .ok_or(CatalogError::not_found("Article", id))?;
        self.join_article(&article).await
    }

    // ------------------------------------------------------------------
    // Lifecycle action — disable
    // ------------------------------------------------------------------

    /// Idempotent: disabling an already-inactive record is a no-op success
    pub async fn disable_category(&self, id: Uuid) -> Result<()> {
        if !self.store.set_category_active(id, false).await? {
            return Err(CatalogError::not_found("Category", id));
        }
        info!("Disabled Category {}", id);
        Ok(())
    }

    pub async fn disable_product(&self, id: Uuid) -> Result<()> {
        if !self.store.set_product_active(id, false).await? {
            return Err(CatalogError::not_found("Product", id));
        }
        info!("Disabled Product {}", id);
        Ok(())
    }

    pub async fn disable_article(&self, id: Uuid) -> Result<()> {
        if !self.store.set_article_active(id, false).await? {
            return Err(CatalogError::not_found("Article", id));
        }
        info!("Disabled Article {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    async fn expand_product(&self, product: &ProductRow) -> Result<ProductDetail> {
        let articles = self
            .store
            .articles(ArticleFilter::active_of_product(product.id))
            .await?;
        Ok(projection::product_detail(product, &articles))
    }

    async fn join_article(&self, article: &ArticleRow) -> Result<ArticleRich> {
        let product = self
            .store
            .product(article.product_id)
            .await?
            .ok_or(CatalogError::not_found("Product", article.product_id))?;
        let category = self
            .store
            .category(product.category_id)
            .await?
            .ok_or(CatalogError::not_found("Category", product.category_id))?;
        Ok(projection::article_rich(article, &product, &category))
    }
}
