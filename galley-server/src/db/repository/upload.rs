//! Upload File Repository

use super::RepoResult;
use crate::db::dao::{Dao, Entity};
use shared::models::UploadFile;
use sqlx::SqlitePool;

impl Entity for UploadFile {
    const TABLE: &'static str = "upload_file";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "original_name",
        "stored_name",
        "content_hash",
        "size",
        "format",
        "url",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const UNIQUE: &'static [&'static str] = &["content_hash"];
}

/// Content-hash lookup backing upload deduplication
pub async fn find_by_hash(pool: &SqlitePool, hash: &str) -> RepoResult<Option<UploadFile>> {
    Dao::<UploadFile>::new(pool).get_by("content_hash", hash).await
}

pub async fn insert(
    pool: &SqlitePool,
    original_name: &str,
    stored_name: &str,
    content_hash: &str,
    size: i64,
    format: &str,
    url: &str,
) -> RepoResult<UploadFile> {
    Dao::<UploadFile>::new(pool)
        .insert(vec![
            ("original_name", original_name.into()),
            ("stored_name", stored_name.into()),
            ("content_hash", content_hash.into()),
            ("size", size.into()),
            ("format", format.into()),
            ("url", url.into()),
        ])
        .await
}
