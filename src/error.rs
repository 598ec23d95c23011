//! Error types for store operations

use sea_orm::DbErr;
use thiserror::Error;

/// Field constraint violations detected before a write.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: &'static str },

    #[error("Field {field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid format for {field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    #[error("Invalid choice for {field}: {value:?}")]
    InvalidChoice { field: &'static str, value: String },
}

/// Errors returned by repositories and connection helpers.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DataError::NotFound { entity, id }
    }
}

pub type DataResult<T> = Result<T, DataError>;
