//! Error handling for the catalog core
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A field value failed validation (price floor, description containment, ...)
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// A foreign key points to a record failing a required precondition
    #[error("Invalid reference in '{field}': {message}")]
    InvalidReference { field: &'static str, message: String },

    /// Name uniqueness violation (case-sensitive exact match)
    #[error("{entity} named '{name}' already exists")]
    DuplicateKey { entity: &'static str, name: String },

    /// The identifier does not resolve to a record of the expected type
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Store-level failure not caught by the validation rules
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::InvalidValue {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_reference(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::InvalidReference {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        CatalogError::NotFound { entity, id }
    }

    /// The field a validation failure is attached to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CatalogError::InvalidValue { field, .. } => Some(field),
            CatalogError::InvalidReference { field, .. } => Some(field),
            CatalogError::DuplicateKey { .. } => Some("name"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
