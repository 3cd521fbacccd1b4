//! Upload File Model

use serde::{Deserialize, Serialize};

/// Stored upload, deduplicated by content hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UploadFile {
    pub id: i64,
    pub original_name: String,
    pub stored_name: String,
    /// SHA256 of the stored bytes
    pub content_hash: String,
    pub size: i64,
    pub format: String,
    pub url: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}
