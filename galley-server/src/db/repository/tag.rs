//! Tag Repository

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec};
use shared::models::{Tag, TagCreate, TagUpdate, Tagging, TaggingCreate, TaggingUpdate};
use sqlx::SqlitePool;

impl Entity for Tag {
    const TABLE: &'static str = "tag";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "sort",
        "is_active",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name"];
    const UNIQUE: &'static [&'static str] = &["name"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
}

impl Entity for Tagging {
    const TABLE: &'static str = "tagging";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "dish_id",
        "tag_id",
        "sort",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
}

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<Tag>, i64)> {
    Dao::<Tag>::new(pool).list(spec).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Tag> {
    Dao::<Tag>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: TagCreate) -> RepoResult<Tag> {
    Dao::<Tag>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("sort", data.sort.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: TagUpdate) -> RepoResult<Tag> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.is_active {
        columns.push(("is_active", v.into()));
    }
    Dao::<Tag>::new(pool).update(id, columns).await
}

/// Hard delete tags, cascading their dish assignments
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let marks = vec!["?"; ids.len()].join(", ");
    let sql = format!("DELETE FROM tagging WHERE tag_id IN ({marks})");
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    query.execute(pool).await?;

    Dao::<Tag>::new(pool).delete(ids, false, vec![]).await
}

// ==================== Taggings ====================

pub async fn list_taggings(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<Tagging>, i64)> {
    Dao::<Tagging>::new(pool).list(spec).await
}

pub async fn get_tagging(pool: &SqlitePool, id: i64) -> RepoResult<Tagging> {
    Dao::<Tagging>::new(pool).get(id).await
}

pub async fn create_tagging(pool: &SqlitePool, data: TaggingCreate) -> RepoResult<Tagging> {
    Dao::<Tagging>::new(pool)
        .insert(vec![
            ("dish_id", data.dish_id.into()),
            ("tag_id", data.tag_id.into()),
            ("sort", data.sort.into()),
        ])
        .await
}

pub async fn update_tagging(pool: &SqlitePool, id: i64, data: TaggingUpdate) -> RepoResult<Tagging> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.dish_id {
        columns.push(("dish_id", v.into()));
    }
    if let Some(v) = data.tag_id {
        columns.push(("tag_id", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    Dao::<Tagging>::new(pool).update(id, columns).await
}

pub async fn delete_taggings(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<Tagging>::new(pool).delete(ids, false, vec![]).await
}
