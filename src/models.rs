//! Entity records for the catalog hierarchy: Category → Product → Article

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    /// Grade sourced from an external provider; never computed locally
    pub ecoscore: Option<String>,
    pub active: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct ArticleRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub product_id: Uuid,
    pub active: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategoryFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProductFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Uuid,
    pub ecoscore: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewArticleFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub product_id: Uuid,
    pub active: Option<bool>,
}

impl CategoryRow {
    pub fn from_fields(fields: &NewCategoryFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            active: fields.active.unwrap_or(true),
            date_created: now,
            date_updated: now,
        }
    }
}

impl ProductRow {
    pub fn from_fields(fields: &NewProductFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            category_id: fields.category_id,
            ecoscore: fields.ecoscore.clone(),
            active: fields.active.unwrap_or(true),
            date_created: now,
            date_updated: now,
        }
    }
}

impl ArticleRow {
    pub fn from_fields(fields: &NewArticleFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            price: fields.price,
            product_id: fields.product_id,
            active: fields.active.unwrap_or(true),
            date_created: now,
            date_updated: now,
        }
    }
}
