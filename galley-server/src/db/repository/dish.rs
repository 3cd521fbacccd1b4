//! Dish Repository
//!
//! The read shapes ([`DishOut`]) attach kitchen names and ordered image
//! lists through explicit batch lookups; the entity rows stay plain.

use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;

use super::{RepoError, RepoResult};
use crate::db::dao::{Arg, Dao, Entity, ImportColumn, QuerySpec};
use shared::ErrorCode;
use shared::models::{
    Dish, DishBom, DishBomCreate, DishBomUpdate, DishBranch, DishBranchCreate, DishBranchOut,
    DishBranchUpdate, DishCreate, DishImage, DishImageCreate, DishImageUpdate, DishOut, DishUpdate,
};
use shared::util::{now_millis, snowflake_id};

/// `dish_image.product_type` discriminators
pub const PRODUCT_TYPE_DISH: i64 = 1;
pub const PRODUCT_TYPE_COMBO: i64 = 2;

/// Header schema for bulk dish import/export
pub const IMPORT_HEADERS: &[ImportColumn] = &[
    ImportColumn {
        label: "名称",
        field: "name",
        required: true,
    },
    ImportColumn {
        label: "厨部",
        field: "kitchen_id",
        required: true,
    },
    ImportColumn {
        label: "显示名称",
        field: "display_name",
        required: false,
    },
    ImportColumn {
        label: "英文名称",
        field: "english_name",
        required: false,
    },
    ImportColumn {
        label: "规格",
        field: "spec",
        required: false,
    },
    ImportColumn {
        label: "单位",
        field: "unit",
        required: false,
    },
    ImportColumn {
        label: "价格",
        field: "price",
        required: false,
    },
    ImportColumn {
        label: "上架时间",
        field: "time_on",
        required: false,
    },
    ImportColumn {
        label: "下架时间",
        field: "time_off",
        required: false,
    },
    ImportColumn {
        label: "排序号",
        field: "sort",
        required: false,
    },
    ImportColumn {
        label: "状态",
        field: "status",
        required: true,
    },
    ImportColumn {
        label: "简介",
        field: "description",
        required: false,
    },
    ImportColumn {
        label: "英文简介",
        field: "english_description",
        required: false,
    },
];

impl Entity for Dish {
    const TABLE: &'static str = "dish";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "kitchen_id",
        "display_name",
        "english_name",
        "spec",
        "unit",
        "price",
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

impl Entity for DishImage {
    const TABLE: &'static str = "dish_image";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "product_type",
        "product_id",
        "platform",
        "url",
        "is_primary",
        "sort",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const DEFAULT_ORDER: &'static str = "is_primary DESC, sort ASC";
}

impl Entity for DishBom {
    const TABLE: &'static str = "dish_bom";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "product_type",
        "product_id",
        "material_type",
        "material_id",
        "spec",
        "unit",
        "quantity",
        "sort",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const DEFAULT_ORDER: &'static str = "sort ASC, id ASC";
}

impl Entity for DishBranch {
    const TABLE: &'static str = "dish_branch";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "dish_id",
        "branch_id",
        "display_name",
        "english_name",
        "price",
        "cost_price",
        "sort",
        "status",
        "description",
        "english_description",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["display_name", "english_name"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
}

// ==================== Dishes ====================

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<DishOut>, i64)> {
    let (dishes, total) = Dao::<Dish>::new(pool).list(spec).await?;
    let out = attach_read_side(pool, dishes).await?;
    Ok((out, total))
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<DishOut> {
    let dish = Dao::<Dish>::new(pool).get(id).await?;
    let mut out = attach_read_side(pool, vec![dish]).await?;
    Ok(out.remove(0))
}

pub async fn get_dish(pool: &SqlitePool, id: i64) -> RepoResult<Dish> {
    Dao::<Dish>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: DishCreate) -> RepoResult<DishOut> {
    // The kitchen must be live
    crate::db::repository::kitchen::get(pool, data.kitchen_id).await?;

    let directives = data.images.clone();
    let dish = Dao::<Dish>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("kitchen_id", data.kitchen_id.into()),
            ("display_name", data.display_name.into()),
            ("english_name", data.english_name.into()),
            ("spec", data.spec.into()),
            ("unit", data.unit.into()),
            ("price", data.price.into()),
            ("time_on", data.time_on.into()),
            ("time_off", data.time_off.into()),
            ("sort", data.sort.into()),
            ("status", data.status.into()),
            ("description", data.description.into()),
            ("english_description", data.english_description.into()),
        ])
        .await?;

    apply_image_ops(pool, PRODUCT_TYPE_DISH, dish.id, &directives).await?;
    get(pool, dish.id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: DishUpdate) -> RepoResult<DishOut> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.kitchen_id {
        crate::db::repository::kitchen::get(pool, v).await?;
        columns.push(("kitchen_id", v.into()));
    }
    if let Some(v) = data.display_name {
        columns.push(("display_name", v.into()));
    }
    if let Some(v) = data.english_name {
        columns.push(("english_name", v.into()));
    }
    if let Some(v) = data.spec {
        columns.push(("spec", v.into()));
    }
    if let Some(v) = data.unit {
        columns.push(("unit", v.into()));
    }
    if let Some(v) = data.price {
        columns.push(("price", v.into()));
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

    Dao::<Dish>::new(pool).update(id, columns).await?;

    if let Some(directives) = data.images {
        apply_image_ops(pool, PRODUCT_TYPE_DISH, id, &directives).await?;
    }
    get(pool, id).await
}

/// Hard delete dishes, cascading images, taggings, BOM lines and branch
/// overrides in one transaction
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let marks = vec!["?"; ids.len()].join(", ");
    let mut tx = pool.begin().await?;

    for sql in [
        format!(
            "DELETE FROM dish_image WHERE product_type = {PRODUCT_TYPE_DISH} \
             AND product_id IN ({marks})"
        ),
        format!(
            "DELETE FROM dish_bom WHERE product_type = {PRODUCT_TYPE_DISH} \
             AND product_id IN ({marks})"
        ),
        format!("DELETE FROM tagging WHERE dish_id IN ({marks})"),
        format!("DELETE FROM dish_branch WHERE dish_id IN ({marks})"),
        format!("DELETE FROM dish WHERE id IN ({marks})"),
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

async fn attach_read_side(pool: &SqlitePool, dishes: Vec<Dish>) -> RepoResult<Vec<DishOut>> {
    let kitchen_ids: Vec<Arg> = dishes.iter().map(|d| d.kitchen_id.into()).collect();
    let kitchen_names: HashMap<i64, String> = if kitchen_ids.is_empty() {
        HashMap::new()
    } else {
        let spec = QuerySpec::new().in_list("id", kitchen_ids).with_deleted();
        let (kitchens, _) = Dao::<shared::models::Kitchen>::new(pool).list(&spec).await?;
        kitchens.into_iter().map(|k| (k.id, k.name)).collect()
    };

    let ids: Vec<i64> = dishes.iter().map(|d| d.id).collect();
    let mut images = images_for(pool, PRODUCT_TYPE_DISH, &ids).await?;

    Ok(dishes
        .into_iter()
        .map(|dish| {
            let kitchen_name = kitchen_names.get(&dish.kitchen_id).cloned();
            let images = images.remove(&dish.id).unwrap_or_default();
            DishOut {
                dish,
                kitchen_name,
                images,
            }
        })
        .collect())
}

/// Ordered image urls for a set of products (primary first, then sort)
pub async fn images_for(
    pool: &SqlitePool,
    product_type: i64,
    product_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<String>>> {
    let mut result: HashMap<i64, Vec<String>> = HashMap::new();
    if product_ids.is_empty() {
        return Ok(result);
    }

    let spec = QuerySpec::new()
        .eq("product_type", product_type)
        .in_list(
            "product_id",
            product_ids.iter().map(|id| Arg::I64(*id)).collect(),
        )
        .order("is_primary DESC, sort ASC, id ASC");

    let (rows, _) = Dao::<DishImage>::new(pool).list(&spec).await?;
    for row in rows {
        result.entry(row.product_id).or_default().push(row.url);
    }
    Ok(result)
}

// ==================== Image directives ====================

enum ImageOp {
    Add,
    Delete,
    Update,
    Original,
}

fn parse_directive(directive: &str) -> RepoResult<(String, ImageOp)> {
    let Some((url, op)) = directive.rsplit_once('?') else {
        return Err(RepoError::Business(
            ErrorCode::InvalidImageDirective,
            format!("malformed image directive: {directive}"),
        ));
    };
    if url.is_empty() {
        return Err(RepoError::Business(
            ErrorCode::InvalidImageDirective,
            "image directive has an empty url".into(),
        ));
    }
    let op = match op {
        "add" => ImageOp::Add,
        "delete" => ImageOp::Delete,
        "update" => ImageOp::Update,
        "original" => ImageOp::Original,
        other => {
            return Err(RepoError::Business(
                ErrorCode::InvalidImageDirective,
                format!("unknown image operation: {other}"),
            ));
        }
    };
    Ok((url.to_string(), op))
}

/// Apply a batch of `"url?op"` image directives for one product
///
/// The whole batch is transactional: a directive that references a missing
/// image row fails with `DishImageNotFound` and nothing is applied.
pub async fn apply_image_ops(
    pool: &SqlitePool,
    product_type: i64,
    product_id: i64,
    directives: &[String],
) -> RepoResult<()> {
    if directives.is_empty() {
        return Ok(());
    }

    // Parse everything up front so a malformed entry costs no writes
    let mut parsed = Vec::with_capacity(directives.len());
    for directive in directives {
        parsed.push(parse_directive(directive)?);
    }

    let mut tx = pool.begin().await?;
    let mut position: i64 = 0;

    for (url, op) in parsed {
        position += 10;
        match op {
            ImageOp::Add => {
                let is_primary = position == 10;
                let now = now_millis();
                sqlx::query(
                    "INSERT INTO dish_image (id, product_type, product_id, platform, url, \
                     is_primary, sort, created_at, updated_at, is_deleted) \
                     VALUES (?, ?, ?, 'default', ?, ?, ?, ?, ?, 0)",
                )
                .bind(snowflake_id())
                .bind(product_type)
                .bind(product_id)
                .bind(&url)
                .bind(is_primary)
                .bind(position)
                .bind(now)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
            ImageOp::Delete => {
                position -= 10;
                let image = find_image(&mut tx, product_type, product_id, &url).await?;
                sqlx::query("DELETE FROM dish_image WHERE id = ?")
                    .bind(image.0)
                    .execute(&mut *tx)
                    .await?;
            }
            ImageOp::Update | ImageOp::Original => {
                let (image_id, _sort, _primary) =
                    find_image(&mut tx, product_type, product_id, &url).await?;
                let is_primary = position == 10;
                sqlx::query(
                    "UPDATE dish_image SET sort = ?, is_primary = ?, updated_at = ? WHERE id = ?",
                )
                .bind(position)
                .bind(is_primary)
                .bind(now_millis())
                .bind(image_id)
                .execute(&mut *tx)
                .await?;
            }
        }
    }

    tx.commit().await?;
    Ok(())
}

async fn find_image(
    tx: &mut Transaction<'_, Sqlite>,
    product_type: i64,
    product_id: i64,
    url: &str,
) -> RepoResult<(i64, i64, bool)> {
    let row: Option<(i64, i64, bool)> = sqlx::query_as(
        "SELECT id, sort, is_primary FROM dish_image WHERE product_type = ? AND product_id = ? \
         AND url = ? AND is_deleted = 0 LIMIT 1",
    )
    .bind(product_type)
    .bind(product_id)
    .bind(url)
    .fetch_optional(&mut **tx)
    .await?;

    row.ok_or_else(|| {
        RepoError::Business(
            ErrorCode::DishImageNotFound,
            format!("image {url} does not exist for product {product_id}"),
        )
    })
}

// ==================== Images CRUD ====================

pub async fn list_images(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<DishImage>, i64)> {
    Dao::<DishImage>::new(pool).list(spec).await
}

pub async fn get_image(pool: &SqlitePool, id: i64) -> RepoResult<DishImage> {
    Dao::<DishImage>::new(pool).get(id).await
}

pub async fn create_image(pool: &SqlitePool, data: DishImageCreate) -> RepoResult<DishImage> {
    Dao::<DishImage>::new(pool)
        .insert(vec![
            ("product_type", data.product_type.into()),
            ("product_id", data.product_id.into()),
            ("platform", data.platform.into()),
            ("url", data.url.into()),
            ("is_primary", data.is_primary.into()),
            ("sort", data.sort.into()),
        ])
        .await
}

pub async fn update_image(pool: &SqlitePool, id: i64, data: DishImageUpdate) -> RepoResult<DishImage> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.platform {
        columns.push(("platform", v.into()));
    }
    if let Some(v) = data.url {
        columns.push(("url", v.into()));
    }
    if let Some(v) = data.is_primary {
        columns.push(("is_primary", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    Dao::<DishImage>::new(pool).update(id, columns).await
}

pub async fn delete_images(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<DishImage>::new(pool).delete(ids, false, vec![]).await
}

// ==================== BOM ====================

pub async fn list_boms(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<DishBom>, i64)> {
    Dao::<DishBom>::new(pool).list(spec).await
}

pub async fn get_bom(pool: &SqlitePool, id: i64) -> RepoResult<DishBom> {
    Dao::<DishBom>::new(pool).get(id).await
}

pub async fn create_bom(pool: &SqlitePool, data: DishBomCreate) -> RepoResult<DishBom> {
    Dao::<DishBom>::new(pool)
        .insert(vec![
            ("product_type", data.product_type.into()),
            ("product_id", data.product_id.into()),
            ("material_type", data.material_type.into()),
            ("material_id", data.material_id.into()),
            ("spec", data.spec.into()),
            ("unit", data.unit.into()),
            ("quantity", data.quantity.into()),
            ("sort", data.sort.into()),
        ])
        .await
}

pub async fn update_bom(pool: &SqlitePool, id: i64, data: DishBomUpdate) -> RepoResult<DishBom> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.material_type {
        columns.push(("material_type", v.into()));
    }
    if let Some(v) = data.material_id {
        columns.push(("material_id", v.into()));
    }
    if let Some(v) = data.spec {
        columns.push(("spec", v.into()));
    }
    if let Some(v) = data.unit {
        columns.push(("unit", v.into()));
    }
    if let Some(v) = data.quantity {
        columns.push(("quantity", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    Dao::<DishBom>::new(pool).update(id, columns).await
}

pub async fn delete_boms(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<DishBom>::new(pool).delete(ids, false, vec![]).await
}

// ==================== Branch overrides ====================

pub async fn list_branch_dishes(
    pool: &SqlitePool,
    spec: &QuerySpec,
) -> RepoResult<(Vec<DishBranchOut>, i64)> {
    let (rows, total) = Dao::<DishBranch>::new(pool).list(spec).await?;

    let dish_ids: Vec<Arg> = rows.iter().map(|r| r.dish_id.into()).collect();
    let dish_names: HashMap<i64, String> = if dish_ids.is_empty() {
        HashMap::new()
    } else {
        let spec = QuerySpec::new().in_list("id", dish_ids).with_deleted();
        let (dishes, _) = Dao::<Dish>::new(pool).list(&spec).await?;
        dishes.into_iter().map(|d| (d.id, d.name)).collect()
    };

    let branch_ids: Vec<Arg> = rows.iter().map(|r| r.branch_id.into()).collect();
    let branch_names: HashMap<i64, String> = if branch_ids.is_empty() {
        HashMap::new()
    } else {
        let spec = QuerySpec::new().in_list("id", branch_ids).with_deleted();
        let (branches, _) = Dao::<shared::models::Branch>::new(pool).list(&spec).await?;
        branches.into_iter().map(|b| (b.id, b.name)).collect()
    };

    let out = rows
        .into_iter()
        .map(|row| {
            let dish_name = dish_names.get(&row.dish_id).cloned();
            let branch_name = branch_names.get(&row.branch_id).cloned();
            DishBranchOut {
                dish_branch: row,
                dish_name,
                branch_name,
            }
        })
        .collect();
    Ok((out, total))
}

pub async fn get_branch_dish(pool: &SqlitePool, id: i64) -> RepoResult<DishBranch> {
    Dao::<DishBranch>::new(pool).get(id).await
}

pub async fn create_branch_dish(pool: &SqlitePool, data: DishBranchCreate) -> RepoResult<DishBranch> {
    get_dish(pool, data.dish_id).await?;
    Dao::<DishBranch>::new(pool)
        .insert(vec![
            ("dish_id", data.dish_id.into()),
            ("branch_id", data.branch_id.into()),
            ("display_name", data.display_name.into()),
            ("english_name", data.english_name.into()),
            ("price", data.price.into()),
            ("cost_price", data.cost_price.into()),
            ("sort", data.sort.into()),
            ("status", data.status.into()),
            ("description", data.description.into()),
            ("english_description", data.english_description.into()),
        ])
        .await
}

pub async fn update_branch_dish(
    pool: &SqlitePool,
    id: i64,
    data: DishBranchUpdate,
) -> RepoResult<DishBranch> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.display_name {
        columns.push(("display_name", v.into()));
    }
    if let Some(v) = data.english_name {
        columns.push(("english_name", v.into()));
    }
    if let Some(v) = data.price {
        columns.push(("price", v.into()));
    }
    if let Some(v) = data.cost_price {
        columns.push(("cost_price", v.into()));
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
    Dao::<DishBranch>::new(pool).update(id, columns).await
}

pub async fn delete_branch_dishes(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    Dao::<DishBranch>::new(pool).delete(ids, false, vec![]).await
}
