//! Validation Rules Engine
//!
//! Create-time checks gating persistence. Field-level checks run before
//! record-level (cross-field and cross-entity) checks; the first failure
//! short-circuits. Nothing is written when any rule fails.

use rust_decimal::Decimal;

use crate::error::{CatalogError, Result};
use crate::models::{NewArticleFields, NewCategoryFields, NewProductFields};
use crate::store::CatalogStore;

/// Minimum article price, exclusive floor below 1.00 currency units
pub const PRICE_FLOOR: Decimal = Decimal::ONE;

pub async fn validate_new_category(
    store: &dyn CatalogStore,
    fields: &NewCategoryFields,
) -> Result<()> {
    if store.category_by_name(&fields.name).await?.is_some() {
        return Err(CatalogError::DuplicateKey {
            entity: "Category",
            name: fields.name.clone(),
        });
    }
    // Cross-field rule: the description must mention the category by name
    if !fields.description.contains(&fields.name) {
        return Err(CatalogError::invalid_value(
            "description",
            format!("must contain the category name '{}'", fields.name),
        ));
    }
    Ok(())
}

pub async fn validate_new_product(
    store: &dyn CatalogStore,
    fields: &NewProductFields,
) -> Result<()> {
    if store.product_by_name(&fields.name).await?.is_some() {
        return Err(CatalogError::DuplicateKey {
            entity: "Product",
            name: fields.name.clone(),
        });
    }
    if store.category(fields.category_id).await?.is_none() {
        return Err(CatalogError::invalid_reference(
            "category_id",
            format!("category {} does not exist", fields.category_id),
        ));
    }
    Ok(())
}

pub async fn validate_new_article(
    store: &dyn CatalogStore,
    fields: &NewArticleFields,
) -> Result<()> {
    if fields.price < PRICE_FLOOR {
        return Err(CatalogError::invalid_value(
            "price",
            format!("price {} is below the 1.00 floor", fields.price),
        ));
    }
    if store.article_by_name(&fields.name).await?.is_some() {
        return Err(CatalogError::DuplicateKey {
            entity: "Article",
            name: fields.name.clone(),
        });
    }
    // Checked once, at creation; deactivating the product later does not
    // retroactively invalidate existing articles.
    match store.product(fields.product_id).await? {
        None => Err(CatalogError::invalid_reference(
            "product_id",
            format!("product {} does not exist", fields.product_id),
        )),
        Some(product) if !product.active => Err(CatalogError::invalid_reference(
            "product_id",
            format!("product '{}' is inactive", product.name),
        )),
        Some(_) => Ok(()),
    }
}
