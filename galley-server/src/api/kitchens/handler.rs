//! Kitchen API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, validate};
use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::kitchen;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{
    Kitchen, KitchenBranch, KitchenBranchCreate, KitchenBranchUpdate, KitchenCreate, KitchenUpdate,
};

#[derive(Debug, Deserialize)]
pub struct KitchenQuery {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/kitchen - 获取厨部列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<KitchenQuery>,
) -> AppResult<ApiResponse<Vec<Kitchen>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .eq_opt("is_active", query.is_active)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = kitchen::list(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/kitchen/:id - 获取厨部信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Kitchen>> {
    let row = kitchen::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/kitchen - 创建厨部
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<KitchenCreate>,
) -> AppResult<ApiResponse<Kitchen>> {
    validate(&payload)?;
    let created = kitchen::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/kitchen/:id - 更新厨部
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<KitchenUpdate>,
) -> AppResult<ApiResponse<Kitchen>> {
    let updated = kitchen::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/kitchen - 删除厨部（硬删除，存在菜品则无法删除）
pub async fn delete(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    kitchen::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct KitchenBranchQuery {
    pub branch_id: Option<i64>,
    pub kitchen_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/kitchenbranch - 获取店铺厨部列表
pub async fn list_links(
    State(state): State<AppState>,
    Query(query): Query<KitchenBranchQuery>,
) -> AppResult<ApiResponse<Vec<KitchenBranch>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("branch_id", query.branch_id)
    .eq_opt("kitchen_id", query.kitchen_id);
    let (rows, total) = kitchen::list_links(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/kitchenbranch/:id - 获取店铺厨部信息
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<KitchenBranch>> {
    let row = kitchen::get_link(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/kitchenbranch - 创建店铺厨部
pub async fn create_link(
    State(state): State<AppState>,
    Json(payload): Json<KitchenBranchCreate>,
) -> AppResult<ApiResponse<KitchenBranch>> {
    let created = kitchen::create_link(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/kitchenbranch/:id - 更新店铺厨部
pub async fn update_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<KitchenBranchUpdate>,
) -> AppResult<ApiResponse<KitchenBranch>> {
    let updated = kitchen::update_link(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/kitchenbranch - 删除店铺厨部（硬删除）
pub async fn delete_links(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    kitchen::delete_links(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
