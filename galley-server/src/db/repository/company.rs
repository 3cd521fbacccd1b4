//! Company and Branch Repository

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use shared::models::{Branch, BranchCreate, BranchUpdate, Company, CompanyCreate, CompanyUpdate};
use sqlx::SqlitePool;

impl Entity for Company {
    const TABLE: &'static str = "company";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "busi_type",
        "is_active",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name"];
    const UNIQUE: &'static [&'static str] = &["name"];
    const RESTRICT_REFS: &'static [RefCheck] = &[RefCheck {
        table: "branch",
        column: "company_id",
        live_only: true,
    }];
}

impl Entity for Branch {
    const TABLE: &'static str = "branch";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "company_id",
        "web_site",
        "is_active",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name"];
    const UNIQUE: &'static [&'static str] = &["name"];
}

// ==================== Companies ====================

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<Company>, i64)> {
    Dao::<Company>::new(pool).list(spec).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Company> {
    Dao::<Company>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: CompanyCreate) -> RepoResult<Company> {
    Dao::<Company>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("busi_type", data.busi_type.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: CompanyUpdate) -> RepoResult<Company> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.busi_type {
        columns.push(("busi_type", v.into()));
    }
    if let Some(v) = data.is_active {
        columns.push(("is_active", v.into()));
    }
    Dao::<Company>::new(pool).update(id, columns).await
}

/// Hard delete; blocked while live branches belong to the company
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<Company>::new(pool).delete(ids, false, vec![]).await
}

// ==================== Branches ====================

pub async fn list_branches(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<Branch>, i64)> {
    Dao::<Branch>::new(pool).list(spec).await
}

pub async fn get_branch(pool: &SqlitePool, id: i64) -> RepoResult<Branch> {
    Dao::<Branch>::new(pool).get(id).await
}

pub async fn create_branch(pool: &SqlitePool, data: BranchCreate) -> RepoResult<Branch> {
    // The owning company must be live
    get(pool, data.company_id).await?;
    Dao::<Branch>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("company_id", data.company_id.into()),
            ("web_site", data.web_site.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update_branch(pool: &SqlitePool, id: i64, data: BranchUpdate) -> RepoResult<Branch> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.company_id {
        get(pool, v).await?;
        columns.push(("company_id", v.into()));
    }
    if let Some(v) = data.web_site {
        columns.push(("web_site", v.into()));
    }
    if let Some(v) = data.is_active {
        columns.push(("is_active", v.into()));
    }
    Dao::<Branch>::new(pool).update(id, columns).await
}

pub async fn delete_branches(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<Branch>::new(pool).delete(ids, false, vec![]).await
}
