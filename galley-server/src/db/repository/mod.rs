//! Repository Module
//!
//! Per-entity repositories built on the generic [`Dao`](super::dao::Dao).
//! Each file declares the entity descriptor (table, columns, fuzzy/unique
//! columns, restricting references) and the handful of operations that go
//! beyond plain CRUD.

// System domain
pub mod company;
pub mod dept;
pub mod dict;
pub mod menu;
pub mod role;
pub mod setting;
pub mod user;

// Product domain
pub mod combo;
pub mod dish;
pub mod group;
pub mod kitchen;
pub mod tag;

// Records
pub mod record;
pub mod upload;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Referenced: {0}")]
    Referenced(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Ambiguous lookup: {0}")]
    Ambiguous(String),

    #[error("row {row}, field {label} missing")]
    ImportRow { row: usize, label: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("{1}")]
    Business(ErrorCode, String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Referenced(msg) => {
                AppError::with_message(ErrorCode::ReferentialConflict, msg)
            }
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::ValidationFailed, msg),
            RepoError::Ambiguous(msg) => AppError::with_message(ErrorCode::AmbiguousLookup, msg),
            RepoError::ImportRow { row, label } => AppError::with_message(
                ErrorCode::RequiredField,
                format!("row {row}, field {label} missing"),
            )
            .with_detail("row", row as i64)
            .with_detail("field", label),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
