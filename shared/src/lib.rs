//! Shared types for the Galley back-office framework
//!
//! Common types used across crates: error codes, the response envelope,
//! entity models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
