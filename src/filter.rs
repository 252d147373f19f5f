//! Active-State Filter
//!
//! Query-parameter driven narrowing applied uniformly across the three
//! entity collections. By default only `active = true` records are visible;
//! `show_inactive=true` (the exact string) lifts the predicate. Products
//! additionally narrow by `category_id`, Articles by `product_id`. All
//! predicates compose with AND semantics. Unrecognized values are ignored,
//! never rejected.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::{ArticleRow, CategoryRow, ProductRow};

/// Raw query parameters as they arrive on a list request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub show_inactive: Option<String>,
    pub category_id: Option<String>,
    pub product_id: Option<String>,
}

impl ListParams {
    /// Only the exact string "true" disables the active-state predicate
    pub fn include_inactive(&self) -> bool {
        self.show_inactive.as_deref() == Some("true")
    }

    pub fn category_id(&self) -> Option<Uuid> {
        parse_id(self.category_id.as_deref())
    }

    pub fn product_id(&self) -> Option<Uuid> {
        parse_id(self.product_id.as_deref())
    }

    pub fn active_filter(&self) -> ActiveFilter {
        ActiveFilter {
            include_inactive: self.include_inactive(),
        }
    }

    pub fn product_filter(&self) -> ProductFilter {
        ProductFilter {
            active: self.active_filter(),
            category_id: self.category_id(),
        }
    }

    pub fn article_filter(&self) -> ArticleFilter {
        ArticleFilter {
            active: self.active_filter(),
            product_id: self.product_id(),
        }
    }
}

/// Malformed ids are treated as absent filters
fn parse_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|v| Uuid::parse_str(v).ok())
}

/// The uniform visibility predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveFilter {
    pub include_inactive: bool,
}

impl ActiveFilter {
    /// Filter that keeps only active records
    pub fn active_only() -> Self {
        Self {
            include_inactive: false,
        }
    }

    pub fn keeps(&self, active: bool) -> bool {
        self.include_inactive || active
    }

    pub fn matches_category(&self, row: &CategoryRow) -> bool {
        self.keeps(row.active)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub active: ActiveFilter,
    pub category_id: Option<Uuid>,
}

impl ProductFilter {
    /// Active products of one category, the shape the detail projection needs
    pub fn active_of_category(category_id: Uuid) -> Self {
        Self {
            active: ActiveFilter::active_only(),
            category_id: Some(category_id),
        }
    }

    pub fn matches(&self, row: &ProductRow) -> bool {
        self.active.keeps(row.active)
            && self.category_id.map_or(true, |id| row.category_id == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub active: ActiveFilter,
    pub product_id: Option<Uuid>,
}

impl ArticleFilter {
    /// Active articles of one product, the shape the detail projection needs
    pub fn active_of_product(product_id: Uuid) -> Self {
        Self {
            active: ActiveFilter::active_only(),
            product_id: Some(product_id),
        }
    }

    pub fn matches(&self, row: &ArticleRow) -> bool {
        self.active.keeps(row.active)
            && self.product_id.map_or(true, |id| row.product_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(show_inactive: Option<&str>) -> ListParams {
        ListParams {
            show_inactive: show_inactive.map(str::to_string),
            category_id: None,
            product_id: None,
        }
    }

    #[test]
    fn only_exact_true_lifts_the_predicate() {
        assert!(params(Some("true")).include_inactive());
        assert!(!params(Some("True")).include_inactive());
        assert!(!params(Some("1")).include_inactive());
        assert!(!params(Some("yes")).include_inactive());
        assert!(!params(None).include_inactive());
    }

    #[test]
    fn malformed_ids_are_ignored() {
        let p = ListParams {
            show_inactive: None,
            category_id: Some("not-a-uuid".to_string()),
            product_id: Some("".to_string()),
        };
        assert_eq!(p.category_id(), None);
        assert_eq!(p.product_id(), None);
    }

    #[test]
    fn well_formed_ids_narrow() {
        let id = Uuid::new_v4();
        let p = ListParams {
            show_inactive: None,
            category_id: Some(id.to_string()),
            product_id: None,
        };
        assert_eq!(p.category_id(), Some(id));
    }
}
