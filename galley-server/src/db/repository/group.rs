//! Dish Group Repository

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use shared::models::{
    DishGroup, DishGroupCreate, DishGroupItem, DishGroupItemCreate, DishGroupItemUpdate,
    DishGroupUpdate, GroupType, GroupTypeCreate, GroupTypeUpdate,
};
use sqlx::SqlitePool;

impl Entity for GroupType {
    const TABLE: &'static str = "group_type";
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
    const RESTRICT_REFS: &'static [RefCheck] = &[RefCheck {
        table: "dish_group",
        column: "group_type_id",
        live_only: true,
    }];
}

impl Entity for DishGroup {
    const TABLE: &'static str = "dish_group";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "display_name",
        "english_name",
        "group_type_id",
        "stype",
        "branch_id",
        "sort",
        "is_active",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name", "display_name", "english_name"];
    const UNIQUE: &'static [&'static str] = &["name"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
    const RESTRICT_REFS: &'static [RefCheck] = &[RefCheck {
        table: "combo_item",
        column: "group_id",
        live_only: true,
    }];
}

impl Entity for DishGroupItem {
    const TABLE: &'static str = "dish_group_item";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "group_id",
        "dish_id",
        "additional_price",
        "sort",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const DEFAULT_ORDER: &'static str = "sort ASC, id ASC";
}

// ==================== Group types ====================

pub async fn list_types(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<GroupType>, i64)> {
    Dao::<GroupType>::new(pool).list(spec).await
}

pub async fn get_type(pool: &SqlitePool, id: i64) -> RepoResult<GroupType> {
    Dao::<GroupType>::new(pool).get(id).await
}

pub async fn create_type(pool: &SqlitePool, data: GroupTypeCreate) -> RepoResult<GroupType> {
    Dao::<GroupType>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("sort", data.sort.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update_type(pool: &SqlitePool, id: i64, data: GroupTypeUpdate) -> RepoResult<GroupType> {
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
    Dao::<GroupType>::new(pool).update(id, columns).await
}

pub async fn delete_types(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<GroupType>::new(pool).delete(ids, false, vec![]).await
}

// ==================== Groups ====================

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<DishGroup>, i64)> {
    Dao::<DishGroup>::new(pool).list(spec).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<DishGroup> {
    Dao::<DishGroup>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: DishGroupCreate) -> RepoResult<DishGroup> {
    get_type(pool, data.group_type_id).await?;
    Dao::<DishGroup>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("display_name", data.display_name.into()),
            ("english_name", data.english_name.into()),
            ("group_type_id", data.group_type_id.into()),
            ("stype", data.stype.into()),
            ("branch_id", data.branch_id.into()),
            ("sort", data.sort.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: DishGroupUpdate) -> RepoResult<DishGroup> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.display_name {
        columns.push(("display_name", v.into()));
    }
    if let Some(v) = data.english_name {
        columns.push(("english_name", v.into()));
    }
    if let Some(v) = data.group_type_id {
        get_type(pool, v).await?;
        columns.push(("group_type_id", v.into()));
    }
    if let Some(v) = data.stype {
        columns.push(("stype", v.into()));
    }
    if let Some(v) = data.branch_id {
        columns.push(("branch_id", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.is_active {
        columns.push(("is_active", v.into()));
    }
    Dao::<DishGroup>::new(pool).update(id, columns).await
}

/// Hard delete groups, cascading their dish items; refused while a combo
/// slot still uses the group
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    let affected = Dao::<DishGroup>::new(pool).delete(ids, false, vec![]).await?;
    if affected > 0 {
        let marks = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM dish_group_item WHERE group_id IN ({marks})");
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        query.execute(pool).await?;
    }
    Ok(affected)
}

// ==================== Group items ====================

pub async fn list_items(
    pool: &SqlitePool,
    spec: &QuerySpec,
) -> RepoResult<(Vec<DishGroupItem>, i64)> {
    Dao::<DishGroupItem>::new(pool).list(spec).await
}

pub async fn get_item(pool: &SqlitePool, id: i64) -> RepoResult<DishGroupItem> {
    Dao::<DishGroupItem>::new(pool).get(id).await
}

pub async fn create_item(pool: &SqlitePool, data: DishGroupItemCreate) -> RepoResult<DishGroupItem> {
    get(pool, data.group_id).await?;
    Dao::<DishGroupItem>::new(pool)
        .insert(vec![
            ("group_id", data.group_id.into()),
            ("dish_id", data.dish_id.into()),
            ("additional_price", data.additional_price.into()),
            ("sort", data.sort.into()),
        ])
        .await
}

pub async fn update_item(
    pool: &SqlitePool,
    id: i64,
    data: DishGroupItemUpdate,
) -> RepoResult<DishGroupItem> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.dish_id {
        columns.push(("dish_id", v.into()));
    }
    if let Some(v) = data.additional_price {
        columns.push(("additional_price", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    Dao::<DishGroupItem>::new(pool).update(id, columns).await
}

pub async fn delete_items(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<DishGroupItem>::new(pool).delete(ids, false, vec![]).await
}
