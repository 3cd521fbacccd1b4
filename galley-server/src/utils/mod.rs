//! 工具模块

pub mod logger;

// Re-export error types from shared for handler code
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
