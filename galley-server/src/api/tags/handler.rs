//! Tag API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, validate};
use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::tag;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Tag, TagCreate, TagUpdate, Tagging, TaggingCreate, TaggingUpdate};

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/tag - 获取标签列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> AppResult<ApiResponse<Vec<Tag>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .eq_opt("is_active", query.is_active)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = tag::list(&state.pool, &spec).await.map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/tag/:id - 获取标签信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Tag>> {
    let row = tag::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/tag - 创建标签
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TagCreate>,
) -> AppResult<ApiResponse<Tag>> {
    validate(&payload)?;
    let created = tag::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/tag/:id - 更新标签
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TagUpdate>,
) -> AppResult<ApiResponse<Tag>> {
    let updated = tag::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/tag - 删除标签（硬删除，级联删除菜品标签）
pub async fn delete(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tag::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct TaggingQuery {
    pub dish_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/tagging - 获取菜品标签列表
pub async fn list_taggings(
    State(state): State<AppState>,
    Query(query): Query<TaggingQuery>,
) -> AppResult<ApiResponse<Vec<Tagging>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("dish_id", query.dish_id)
    .eq_opt("tag_id", query.tag_id);
    let (rows, total) = tag::list_taggings(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/tagging/:id - 获取菜品标签信息
pub async fn get_tagging(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Tagging>> {
    let row = tag::get_tagging(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/tagging - 创建菜品标签
pub async fn create_tagging(
    State(state): State<AppState>,
    Json(payload): Json<TaggingCreate>,
) -> AppResult<ApiResponse<Tagging>> {
    let created = tag::create_tagging(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/tagging/:id - 更新菜品标签
pub async fn update_tagging(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaggingUpdate>,
) -> AppResult<ApiResponse<Tagging>> {
    let updated = tag::update_tagging(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/tagging - 删除菜品标签（硬删除）
pub async fn delete_taggings(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tag::delete_taggings(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
