//! Combo Repository (套餐)

use std::collections::HashMap;

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use crate::db::repository::dish::{self, PRODUCT_TYPE_COMBO};
use shared::models::{
    Combo, ComboCreate, ComboItem, ComboItemCreate, ComboItemUpdate, ComboOut, ComboSeries,
    ComboSeriesCreate, ComboSeriesUpdate, ComboUpdate,
};
use sqlx::SqlitePool;

impl Entity for ComboSeries {
    const TABLE: &'static str = "combo_series";
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
        table: "combo",
        column: "series_id",
        live_only: true,
    }];
}

impl Entity for Combo {
    const TABLE: &'static str = "combo";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "display_name",
        "english_name",
        "series_id",
        "person_count",
        "price",
        "cost_price",
        "time_on",
        "time_off",
        "sort",
        "status",
        "description",
        "english_description",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name", "display_name", "english_name"];
    const UNIQUE: &'static [&'static str] = &["name"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
}

impl Entity for ComboItem {
    const TABLE: &'static str = "combo_item";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "combo_id",
        "group_id",
        "display_name",
        "english_name",
        "choose_count",
        "sort",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const DEFAULT_ORDER: &'static str = "sort ASC, id ASC";
}

// ==================== Series ====================

pub async fn list_series(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<ComboSeries>, i64)> {
    Dao::<ComboSeries>::new(pool).list(spec).await
}

pub async fn get_series(pool: &SqlitePool, id: i64) -> RepoResult<ComboSeries> {
    Dao::<ComboSeries>::new(pool).get(id).await
}

pub async fn create_series(pool: &SqlitePool, data: ComboSeriesCreate) -> RepoResult<ComboSeries> {
    Dao::<ComboSeries>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("sort", data.sort.into()),
            ("is_active", data.is_active.into()),
        ])
        .await
}

pub async fn update_series(
    pool: &SqlitePool,
    id: i64,
    data: ComboSeriesUpdate,
) -> RepoResult<ComboSeries> {
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
    Dao::<ComboSeries>::new(pool).update(id, columns).await
}

pub async fn delete_series(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<ComboSeries>::new(pool).delete(ids, false, vec![]).await
}

// ==================== Combos ====================

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<ComboOut>, i64)> {
    let (combos, total) = Dao::<Combo>::new(pool).list(spec).await?;
    let out = attach_read_side(pool, combos).await?;
    Ok((out, total))
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<ComboOut> {
    let combo = Dao::<Combo>::new(pool).get(id).await?;
    let mut out = attach_read_side(pool, vec![combo]).await?;
    Ok(out.remove(0))
}

pub async fn create(pool: &SqlitePool, data: ComboCreate) -> RepoResult<ComboOut> {
    get_series(pool, data.series_id).await?;
    let combo = Dao::<Combo>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("display_name", data.display_name.into()),
            ("english_name", data.english_name.into()),
            ("series_id", data.series_id.into()),
            ("person_count", data.person_count.into()),
            ("price", data.price.into()),
            ("cost_price", data.cost_price.into()),
            ("time_on", data.time_on.into()),
            ("time_off", data.time_off.into()),
            ("sort", data.sort.into()),
            ("status", data.status.into()),
            ("description", data.description.into()),
            ("english_description", data.english_description.into()),
        ])
        .await?;
    get(pool, combo.id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: ComboUpdate) -> RepoResult<ComboOut> {
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
    if let Some(v) = data.series_id {
        get_series(pool, v).await?;
        columns.push(("series_id", v.into()));
    }
    if let Some(v) = data.person_count {
        columns.push(("person_count", v.into()));
    }
    if let Some(v) = data.price {
        columns.push(("price", v.into()));
    }
    if let Some(v) = data.cost_price {
        columns.push(("cost_price", v.into()));
    }
    if let Some(v) = data.time_on {
        columns.push(("time_on", v.into()));
    }
    if let Some(v) = data.time_off {
        columns.push(("time_off", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.status {
        columns.push(("status", v.into()));
    }
    if let Some(v) = data.description {
        columns.push(("description", v.into()));
    }
    if let Some(v) = data.english_description {
        columns.push(("english_description", v.into()));
    }
    Dao::<Combo>::new(pool).update(id, columns).await?;
    get(pool, id).await
}

/// Hard delete combos, cascading their slots and images in one transaction
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let marks = vec!["?"; ids.len()].join(", ");
    let mut tx = pool.begin().await?;

    for sql in [
        format!(
            "DELETE FROM dish_image WHERE product_type = {PRODUCT_TYPE_COMBO} \
             AND product_id IN ({marks})"
        ),
        format!(
            "DELETE FROM dish_bom WHERE product_type = {PRODUCT_TYPE_COMBO} \
             AND product_id IN ({marks})"
        ),
        format!("DELETE FROM combo_item WHERE combo_id IN ({marks})"),
        format!("DELETE FROM combo WHERE id IN ({marks})"),
    ] {
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        query.execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(ids.len() as u64)
}

async fn attach_read_side(pool: &SqlitePool, combos: Vec<Combo>) -> RepoResult<Vec<ComboOut>> {
    let series_ids: Vec<Arg> = combos.iter().map(|c| c.series_id.into()).collect();
    let series_names: HashMap<i64, String> = if series_ids.is_empty() {
        HashMap::new()
    } else {
        let spec = QuerySpec::new().in_list("id", series_ids).with_deleted();
        let (series, _) = Dao::<ComboSeries>::new(pool).list(&spec).await?;
        series.into_iter().map(|s| (s.id, s.name)).collect()
    };

    let ids: Vec<i64> = combos.iter().map(|c| c.id).collect();
    let mut images = dish::images_for(pool, PRODUCT_TYPE_COMBO, &ids).await?;

    Ok(combos
        .into_iter()
        .map(|combo| {
            let series_name = series_names.get(&combo.series_id).cloned();
            let images = images.remove(&combo.id).unwrap_or_default();
            ComboOut {
                combo,
                series_name,
                images,
            }
        })
        .collect())
}

// ==================== Combo items ====================

pub async fn list_items(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<ComboItem>, i64)> {
    Dao::<ComboItem>::new(pool).list(spec).await
}

pub async fn get_item(pool: &SqlitePool, id: i64) -> RepoResult<ComboItem> {
    Dao::<ComboItem>::new(pool).get(id).await
}

pub async fn create_item(pool: &SqlitePool, data: ComboItemCreate) -> RepoResult<ComboItem> {
    Dao::<Combo>::new(pool).get(data.combo_id).await?;
    crate::db::repository::group::get(pool, data.group_id).await?;
    Dao::<ComboItem>::new(pool)
        .insert(vec![
            ("combo_id", data.combo_id.into()),
            ("group_id", data.group_id.into()),
            ("display_name", data.display_name.into()),
            ("english_name", data.english_name.into()),
            ("choose_count", data.choose_count.into()),
            ("sort", data.sort.into()),
        ])
        .await
}

pub async fn update_item(pool: &SqlitePool, id: i64, data: ComboItemUpdate) -> RepoResult<ComboItem> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.group_id {
        crate::db::repository::group::get(pool, v).await?;
        columns.push(("group_id", v.into()));
    }
    if let Some(v) = data.display_name {
        columns.push(("display_name", v.into()));
    }
    if let Some(v) = data.english_name {
        columns.push(("english_name", v.into()));
    }
    if let Some(v) = data.choose_count {
        columns.push(("choose_count", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    Dao::<ComboItem>::new(pool).update(id, columns).await
}

pub async fn delete_items(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<ComboItem>::new(pool).delete(ids, false, vec![]).await
}
