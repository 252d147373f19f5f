//! Nested Projection Builder
//!
//! Two shapes per parent entity: a flat list shape (scalar fields only) and
//! a detail shape embedding the entity's active children. Category detail
//! embeds Product detail projections; Product detail embeds the Article list
//! projection. The rich Article projection flattens the ownership chain
//! (product and category names) as a read-time join, never stored state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ArticleRow, CategoryRow, ProductRow};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryList {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDetail {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub products: Vec<ProductDetail>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductList {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub name: String,
    pub category_id: Uuid,
    pub description: String,
    pub ecoscore: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetail {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub name: String,
    pub category_id: Uuid,
    pub description: String,
    pub ecoscore: Option<String>,
    pub active: bool,
    pub articles: Vec<ArticleList>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleList {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub name: String,
    pub price: Decimal,
    pub product_id: Uuid,
    pub description: String,
    pub active: bool,
}

/// Article scalars plus the flattened ownership chain
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleRich {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub name: String,
    pub price: Decimal,
    pub product_id: Uuid,
    pub product_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub description: String,
    pub active: bool,
}

pub fn category_list(row: &CategoryRow) -> CategoryList {
    CategoryList {
        id: row.id,
        date_created: row.date_created,
        date_updated: row.date_updated,
        name: row.name.clone(),
        description: row.description.clone(),
        active: row.active,
    }
}

pub fn category_detail(row: &CategoryRow, products: Vec<ProductDetail>) -> CategoryDetail {
    CategoryDetail {
        id: row.id,
        date_created: row.date_created,
        date_updated: row.date_updated,
        name: row.name.clone(),
        description: row.description.clone(),
        active: row.active,
        products,
    }
}

pub fn product_list(row: &ProductRow) -> ProductList {
    ProductList {
        id: row.id,
        date_created: row.date_created,
        date_updated: row.date_updated,
        name: row.name.clone(),
        category_id: row.category_id,
        description: row.description.clone(),
        ecoscore: row.ecoscore.clone(),
        active: row.active,
    }
}

pub fn product_detail(row: &ProductRow, articles: &[ArticleRow]) -> ProductDetail {
    ProductDetail {
        id: row.id,
        date_created: row.date_created,
        date_updated: row.date_updated,
        name: row.name.clone(),
        category_id: row.category_id,
        description: row.description.clone(),
        ecoscore: row.ecoscore.clone(),
        active: row.active,
        articles: articles.iter().map(article_list).collect(),
    }
}

pub fn article_list(row: &ArticleRow) -> ArticleList {
    ArticleList {
        id: row.id,
        date_created: row.date_created,
        date_updated: row.date_updated,
        name: row.name.clone(),
        price: row.price,
        product_id: row.product_id,
        description: row.description.clone(),
        active: row.active,
    }
}

pub fn article_rich(row: &ArticleRow, product: &ProductRow, category: &CategoryRow) -> ArticleRich {
    ArticleRich {
        id: row.id,
        date_created: row.date_created,
        date_updated: row.date_updated,
        name: row.name.clone(),
        price: row.price,
        product_id: row.product_id,
        product_name: product.name.clone(),
        category_id: category.id,
        category_name: category.name.clone(),
        description: row.description.clone(),
        active: row.active,
    }
}
