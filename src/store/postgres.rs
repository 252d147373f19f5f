//! Postgres-backed entity store (sqlx)
//!
//! One statement per operation, one transaction per write. The schema's
//! unique indexes on `name` are the final authority on uniqueness: a racing
//! insert that slips past the validation pre-check still surfaces as
//! `DuplicateKey` here instead of corrupting state.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::filter::{ActiveFilter, ArticleFilter, ProductFilter};
use crate::models::{ArticleRow, CategoryRow, ProductRow};
use crate::store::CatalogStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    active BOOLEAN NOT NULL DEFAULT TRUE,
    date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    date_updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    category_id UUID NOT NULL REFERENCES categories(id),
    ecoscore TEXT,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    date_updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE TABLE IF NOT EXISTS articles (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    price NUMERIC(12, 2) NOT NULL,
    product_id UUID NOT NULL REFERENCES products(id),
    active BOOLEAN NOT NULL DEFAULT TRUE,
    date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    date_updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

#[derive(Clone, Debug)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the catalog tables when they do not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to ensure catalog schema")?;
        info!("Catalog schema ready");
        Ok(())
    }
}

/// Translates a constraint violation into the validation taxonomy
fn write_error(err: sqlx::Error, entity: &'static str, name: &str) -> CatalogError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return CatalogError::DuplicateKey {
                entity,
                name: name.to_string(),
            };
        }
    }
    CatalogError::Store(anyhow::Error::new(err).context(format!("Failed to insert {entity}")))
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn insert_category(&self, row: CategoryRow) -> Result<()> {
        sqlx::query(r#"INSERT INTO categories (id, name, description, active, date_created, date_updated) VALUES ($1, $2, $3, $4, $5, $6)"#)
            .bind(row.id).bind(&row.name).bind(&row.description).bind(row.active)
            .bind(row.date_created).bind(row.date_updated)
            .execute(&self.pool).await
            .map_err(|e| write_error(e, "Category", &row.name))?;
        info!("Created Category {} '{}'", row.id, row.name);
        Ok(())
    }

    async fn category(&self, id: Uuid) -> Result<Option<CategoryRow>> {
        Ok(sqlx::query_as::<_, CategoryRow>(r#"SELECT id, name, description, active, date_created, date_updated FROM categories WHERE id = $1"#)
            .bind(id).fetch_optional(&self.pool).await.context("Failed to get Category by id")?)
    }

    async fn category_by_name(&self, name: &str) -> Result<Option<CategoryRow>> {
        Ok(sqlx::query_as::<_, CategoryRow>(r#"SELECT id, name, description, active, date_created, date_updated FROM categories WHERE name = $1"#)
            .bind(name).fetch_optional(&self.pool).await.context("Failed to get Category by name")?)
    }

    async fn categories(&self, filter: ActiveFilter) -> Result<Vec<CategoryRow>> {
        Ok(sqlx::query_as::<_, CategoryRow>(r#"SELECT id, name, description, active, date_created, date_updated FROM categories WHERE (active OR $1) ORDER BY date_created ASC"#)
            .bind(filter.include_inactive).fetch_all(&self.pool).await.context("Failed to list Categories")?)
    }

    async fn set_category_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let result = sqlx::query(r#"UPDATE categories SET active = $1, date_updated = NOW() WHERE id = $2"#)
            .bind(active).bind(id)
            .execute(&self.pool).await.context("Failed to update Category active flag")?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_product(&self, row: ProductRow) -> Result<()> {
        sqlx::query(r#"INSERT INTO products (id, name, description, category_id, ecoscore, active, date_created, date_updated) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#)
            .bind(row.id).bind(&row.name).bind(&row.description).bind(row.category_id)
            .bind(&row.ecoscore).bind(row.active).bind(row.date_created).bind(row.date_updated)
            .execute(&self.pool).await
            .map_err(|e| write_error(e, "Product", &row.name))?;
        info!("Created Product {} '{}'", row.id, row.name);
        Ok(())
    }

    async fn product(&self, id: Uuid) -> Result<Option<ProductRow>> {
        Ok(sqlx::query_as::<_, ProductRow>(r#"SELECT id, name, description, category_id, ecoscore, active, date_created, date_updated FROM products WHERE id = $1"#)
            .bind(id).fetch_optional(&self.pool).await.context("Failed to get Product by id")?)
    }

    async fn product_by_name(&self, name: &str) -> Result<Option<ProductRow>> {
        Ok(sqlx::query_as::<_, ProductRow>(r#"SELECT id, name, description, category_id, ecoscore, active, date_created, date_updated FROM products WHERE name = $1"#)
            .bind(name).fetch_optional(&self.pool).await.context("Failed to get Product by name")?)
    }

    async fn products(&self, filter: ProductFilter) -> Result<Vec<ProductRow>> {
        Ok(sqlx::query_as::<_, ProductRow>(r#"SELECT id, name, description, category_id, ecoscore, active, date_created, date_updated FROM products WHERE (active OR $1) AND ($2::uuid IS NULL OR category_id = $2) ORDER BY date_created ASC"#)
            .bind(filter.active.include_inactive).bind(filter.category_id)
            .fetch_all(&self.pool).await.context("Failed to list Products")?)
    }

    async fn set_product_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let result = sqlx::query(r#"UPDATE products SET active = $1, date_updated = NOW() WHERE id = $2"#)
            .bind(active).bind(id)
            .execute(&self.pool).await.context("Failed to update Product active flag")?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_article(&self, row: ArticleRow) -> Result<()> {
        sqlx::query(r#"INSERT INTO articles (id, name, description, price, product_id, active, date_created, date_updated) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#)
            .bind(row.id).bind(&row.name).bind(&row.description).bind(row.price)
            .bind(row.product_id).bind(row.active).bind(row.date_created).bind(row.date_updated)
            .execute(&self.pool).await
            .map_err(|e| write_error(e, "Article", &row.name))?;
        info!("Created Article {} '{}'", row.id, row.name);
        Ok(())
    }

    async fn article(&self, id: Uuid) -> Result<Option<ArticleRow>> {
        Ok(sqlx::query_as::<_, ArticleRow>(r#"SELECT id, name, description, price, product_id, active, date_created, date_updated FROM articles WHERE id = $1"#)
            .bind(id).fetch_optional(&self.pool).await.context("Failed to get Article by id")?)
    }

    async fn article_by_name(&self, name: &str) -> Result<Option<ArticleRow>> {
        Ok(sqlx::query_as::<_, ArticleRow>(r#"SELECT id, name, description, price, product_id, active, date_created, date_updated FROM articles WHERE name = $1"#)
            .bind(name).fetch_optional(&self.pool).await.context("Failed to get Article by name")?)
    }

    async fn articles(&self, filter: ArticleFilter) -> Result<Vec<ArticleRow>> {
        Ok(sqlx::query_as::<_, ArticleRow>(r#"SELECT id, name, description, price, product_id, active, date_created, date_updated FROM articles WHERE (active OR $1) AND ($2::uuid IS NULL OR product_id = $2) ORDER BY date_created ASC"#)
            .bind(filter.active.include_inactive).bind(filter.product_id)
            .fetch_all(&self.pool).await.context("Failed to list Articles")?)
    }

    async fn set_article_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let result = sqlx::query(r#"UPDATE articles SET active = $1, date_updated = NOW() WHERE id = $2"#)
            .bind(active).bind(id)
            .execute(&self.pool).await.context("Failed to update Article active flag")?;
        Ok(result.rows_affected() > 0)
    }
}
