//! Company / Branch API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, validate};
use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::company;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Branch, BranchCreate, BranchUpdate, Company, CompanyCreate, CompanyUpdate};

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub name: Option<String>,
    pub busi_type: Option<i64>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/company - 获取公司列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> AppResult<ApiResponse<Vec<Company>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .eq_opt("busi_type", query.busi_type)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = company::list(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/company/:id - 获取公司信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Company>> {
    let row = company::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/company - 创建公司
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CompanyCreate>,
) -> AppResult<ApiResponse<Company>> {
    validate(&payload)?;
    let created = company::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/company/:id - 更新公司
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CompanyUpdate>,
) -> AppResult<ApiResponse<Company>> {
    let updated = company::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/company - 删除公司（硬删除，存在店铺则无法删除）
pub async fn delete(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    company::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct BranchQuery {
    pub name: Option<String>,
    pub company_id: Option<i64>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/branch - 获取店铺列表
pub async fn list_branches(
    State(state): State<AppState>,
    Query(query): Query<BranchQuery>,
) -> AppResult<ApiResponse<Vec<Branch>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .eq_opt("company_id", query.company_id)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = company::list_branches(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/branch/:id - 获取店铺信息
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Branch>> {
    let row = company::get_branch(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/branch - 创建店铺
pub async fn create_branch(
    State(state): State<AppState>,
    Json(payload): Json<BranchCreate>,
) -> AppResult<ApiResponse<Branch>> {
    validate(&payload)?;
    let created = company::create_branch(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/branch/:id - 更新店铺
pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BranchUpdate>,
) -> AppResult<ApiResponse<Branch>> {
    let updated = company::update_branch(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/branch - 删除店铺（硬删除）
pub async fn delete_branches(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    company::delete_branches(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
