//! Dictionary Repository

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec};
use shared::models::{
    DictDetail, DictDetailCreate, DictDetailUpdate, DictType, DictTypeCreate, DictTypeUpdate,
};
use sqlx::SqlitePool;
use std::collections::HashMap;

impl Entity for DictType {
    const TABLE: &'static str = "dict_type";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "dict_type",
        "disabled",
        "remark",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name", "dict_type"];
    const UNIQUE: &'static [&'static str] = &["dict_type"];
}

impl Entity for DictDetail {
    const TABLE: &'static str = "dict_detail";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "label",
        "value",
        "sort",
        "disabled",
        "is_default",
        "dict_type_id",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["label"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id ASC";
}

// ==================== Types ====================

pub async fn list_types(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<DictType>, i64)> {
    Dao::<DictType>::new(pool).list(spec).await
}

pub async fn get_type(pool: &SqlitePool, id: i64) -> RepoResult<DictType> {
    Dao::<DictType>::new(pool).get(id).await
}

pub async fn create_type(pool: &SqlitePool, data: DictTypeCreate) -> RepoResult<DictType> {
    Dao::<DictType>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("dict_type", data.dict_type.into()),
            ("disabled", data.disabled.into()),
            ("remark", data.remark.into()),
        ])
        .await
}

pub async fn update_type(pool: &SqlitePool, id: i64, data: DictTypeUpdate) -> RepoResult<DictType> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.dict_type {
        columns.push(("dict_type", v.into()));
    }
    if let Some(v) = data.disabled {
        columns.push(("disabled", v.into()));
    }
    if let Some(v) = data.remark {
        columns.push(("remark", v.into()));
    }
    Dao::<DictType>::new(pool).update(id, columns).await
}

/// Soft delete dictionary types; their elements stay for audit
pub async fn delete_types(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<DictType>::new(pool).delete(ids, true, vec![]).await
}

/// Option item for dict-type selectors
pub async fn type_options(pool: &SqlitePool) -> RepoResult<Vec<(i64, String)>> {
    let spec = QuerySpec::new().eq("disabled", false);
    let (types, _) = Dao::<DictType>::new(pool).list(&spec).await?;
    Ok(types.into_iter().map(|t| (t.id, t.name)).collect())
}

// ==================== Details ====================

pub async fn list_details(
    pool: &SqlitePool,
    spec: &QuerySpec,
) -> RepoResult<(Vec<DictDetail>, i64)> {
    Dao::<DictDetail>::new(pool).list(spec).await
}

pub async fn get_detail(pool: &SqlitePool, id: i64) -> RepoResult<DictDetail> {
    Dao::<DictDetail>::new(pool).get(id).await
}

pub async fn create_detail(pool: &SqlitePool, data: DictDetailCreate) -> RepoResult<DictDetail> {
    // The owning type must be live
    get_type(pool, data.dict_type_id).await?;
    Dao::<DictDetail>::new(pool)
        .insert(vec![
            ("label", data.label.into()),
            ("value", data.value.into()),
            ("sort", data.sort.into()),
            ("disabled", data.disabled.into()),
            ("is_default", data.is_default.into()),
            ("dict_type_id", data.dict_type_id.into()),
        ])
        .await
}

pub async fn update_detail(
    pool: &SqlitePool,
    id: i64,
    data: DictDetailUpdate,
) -> RepoResult<DictDetail> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.label {
        columns.push(("label", v.into()));
    }
    if let Some(v) = data.value {
        columns.push(("value", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.disabled {
        columns.push(("disabled", v.into()));
    }
    if let Some(v) = data.is_default {
        columns.push(("is_default", v.into()));
    }
    if let Some(v) = data.dict_type_id {
        get_type(pool, v).await?;
        columns.push(("dict_type_id", v.into()));
    }
    Dao::<DictDetail>::new(pool).update(id, columns).await
}

pub async fn delete_details(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<DictDetail>::new(pool).delete(ids, false, vec![]).await
}

/// Batch lookup: dict type key → ordered element list
pub async fn details_by_types(
    pool: &SqlitePool,
    type_keys: &[String],
) -> RepoResult<HashMap<String, Vec<DictDetail>>> {
    let mut result: HashMap<String, Vec<DictDetail>> = HashMap::new();
    if type_keys.is_empty() {
        return Ok(result);
    }

    let spec = QuerySpec::new()
        .in_list(
            "dict_type",
            type_keys.iter().map(|k| k.clone().into()).collect(),
        )
        .eq("disabled", false);
    let (types, _) = Dao::<DictType>::new(pool).list(&spec).await?;

    for dict_type in types {
        let detail_spec = QuerySpec::new()
            .eq("dict_type_id", dict_type.id)
            .eq("disabled", false)
            .order("sort ASC, id ASC");
        let (details, _) = Dao::<DictDetail>::new(pool).list(&detail_spec).await?;
        result.insert(dict_type.dict_type, details);
    }
    Ok(result)
}
