//! Kitchen Repository (厨部)

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use shared::models::{
    Kitchen, KitchenBranch, KitchenBranchCreate, KitchenBranchUpdate, KitchenCreate, KitchenUpdate,
};
use sqlx::SqlitePool;

impl Entity for Kitchen {
    const TABLE: &'static str = "kitchen";
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
    // A kitchen with live dishes cannot be hard deleted
    const RESTRICT_REFS: &'static [RefCheck] = &[RefCheck {
        table: "dish",
        column: "kitchen_id",
        live_only: true,
    }];
}

impl Entity for KitchenBranch {
    const TABLE: &'static str = "kitchen_branch";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "branch_id",
        "kitchen_id",
        "sort",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
}

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<Kitchen>, i64)> {
    Dao::<Kitchen>::new(pool).list(spec).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Kitchen> {
    Dao::<Kitchen>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: KitchenCreate) -> RepoResult<Kitchen> {
    Dao::<Kitchen>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("sort", data.sort.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: KitchenUpdate) -> RepoResult<Kitchen> {
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
    Dao::<Kitchen>::new(pool).update(id, columns).await
}

pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<Kitchen>::new(pool).delete(ids, false, vec![]).await
}

// ==================== Kitchen-branch links ====================

pub async fn list_links(
    pool: &SqlitePool,
    spec: &QuerySpec,
) -> RepoResult<(Vec<KitchenBranch>, i64)> {
    Dao::<KitchenBranch>::new(pool).list(spec).await
}

pub async fn get_link(pool: &SqlitePool, id: i64) -> RepoResult<KitchenBranch> {
    Dao::<KitchenBranch>::new(pool).get(id).await
}

pub async fn create_link(pool: &SqlitePool, data: KitchenBranchCreate) -> RepoResult<KitchenBranch> {
    get(pool, data.kitchen_id).await?;
    Dao::<KitchenBranch>::new(pool)
        .insert(vec![
            ("branch_id", data.branch_id.into()),
            ("kitchen_id", data.kitchen_id.into()),
            ("sort", data.sort.into()),
        ])
        .await
}

pub async fn update_link(
    pool: &SqlitePool,
    id: i64,
    data: KitchenBranchUpdate,
) -> RepoResult<KitchenBranch> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.branch_id {
        columns.push(("branch_id", v.into()));
    }
    if let Some(v) = data.kitchen_id {
        get(pool, v).await?;
        columns.push(("kitchen_id", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    Dao::<KitchenBranch>::new(pool).update(id, columns).await
}

pub async fn delete_links(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<KitchenBranch>::new(pool).delete(ids, false, vec![]).await
}
