//! Combo API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, LabelValue, validate};
use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::combo;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::dish::dish_status;
use shared::models::{
    Combo, ComboCreate, ComboItem, ComboItemCreate, ComboItemUpdate, ComboOut, ComboSeries,
    ComboSeriesCreate, ComboSeriesUpdate, ComboUpdate,
};

/// GET /api/dishcombostatusoptions - 套餐状态选择项
pub async fn status_options() -> ApiResponse<Vec<LabelValue>> {
    ApiResponse::success(vec![
        LabelValue {
            label: "新建",
            value: dish_status::NEW,
        },
        LabelValue {
            label: "草稿",
            value: dish_status::DRAFT,
        },
        LabelValue {
            label: "已上传",
            value: dish_status::UPLOADED,
        },
        LabelValue {
            label: "已发布",
            value: dish_status::PUBLISHED,
        },
        LabelValue {
            label: "缺货",
            value: dish_status::OUT_OF_STOCK,
        },
        LabelValue {
            label: "已下架",
            value: dish_status::TAKEN_DOWN,
        },
    ])
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub name: Option<String>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishcomboseries - 获取菜品套餐系列列表
pub async fn list_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> AppResult<ApiResponse<Vec<ComboSeries>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = combo::list_series(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishcomboseries/:id - 获取菜品套餐系列信息
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ComboSeries>> {
    let row = combo::get_series(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishcomboseries - 创建菜品套餐系列
pub async fn create_series(
    State(state): State<AppState>,
    Json(payload): Json<ComboSeriesCreate>,
) -> AppResult<ApiResponse<ComboSeries>> {
    validate(&payload)?;
    let created = combo::create_series(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishcomboseries/:id - 更新菜品套餐系列
pub async fn update_series(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComboSeriesUpdate>,
) -> AppResult<ApiResponse<ComboSeries>> {
    let updated = combo::update_series(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishcomboseries - 删除菜品套餐系列（硬删除，被套餐引用则无法删除）
pub async fn delete_series(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    combo::delete_series(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct ComboQuery {
    pub name: Option<String>,
    pub series_id: Option<i64>,
    pub status: Option<i64>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishcombo - 获取菜品套餐列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ComboQuery>,
) -> AppResult<ApiResponse<Vec<ComboOut>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .eq_opt("series_id", query.series_id)
    .eq_opt("status", query.status)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = combo::list(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishcombo/:id - 获取菜品套餐信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ComboOut>> {
    let row = combo::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishcombo - 创建菜品套餐
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ComboCreate>,
) -> AppResult<ApiResponse<ComboOut>> {
    validate(&payload)?;
    let created = combo::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishcombo/:id - 更新菜品套餐
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComboUpdate>,
) -> AppResult<ApiResponse<ComboOut>> {
    let updated = combo::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishcombo - 删除菜品套餐（硬删除，级联套餐详情与图片）
pub async fn delete(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    combo::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct ComboItemQuery {
    pub combo_id: Option<i64>,
    pub group_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishcombodetail - 获取菜品套餐详情列表
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ComboItemQuery>,
) -> AppResult<ApiResponse<Vec<ComboItem>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("combo_id", query.combo_id)
    .eq_opt("group_id", query.group_id);
    let (rows, total) = combo::list_items(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishcombodetail/:id - 获取菜品套餐详情信息
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ComboItem>> {
    let row = combo::get_item(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishcombodetail - 创建菜品套餐详情
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ComboItemCreate>,
) -> AppResult<ApiResponse<ComboItem>> {
    let created = combo::create_item(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishcombodetail/:id - 更新菜品套餐详情
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComboItemUpdate>,
) -> AppResult<ApiResponse<ComboItem>> {
    let updated = combo::update_item(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishcombodetail - 删除菜品套餐详情（硬删除）
pub async fn delete_items(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    combo::delete_items(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
