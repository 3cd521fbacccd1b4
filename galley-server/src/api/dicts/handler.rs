//! Dictionary API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::{IdList, LabelValue, validate};
use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::dict;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{
    DictDetail, DictDetailCreate, DictDetailUpdate, DictType, DictTypeCreate, DictTypeUpdate,
};

#[derive(Debug, Deserialize)]
pub struct DictTypeQuery {
    pub name: Option<String>,
    pub dict_type: Option<String>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dict/types - 获取字典类型列表
pub async fn list_types(
    State(state): State<AppState>,
    Query(query): Query<DictTypeQuery>,
) -> AppResult<ApiResponse<Vec<DictType>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .like_opt("dict_type", query.dict_type)
    .fuzzy_opt(query.fuzzy);
    let (types, total) = dict::list_types(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(types, total))
}

/// GET /api/dict/types/:id - 获取字典类型详细
pub async fn get_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DictType>> {
    let row = dict::get_type(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dict/types - 创建字典类型
pub async fn create_type(
    State(state): State<AppState>,
    Json(payload): Json<DictTypeCreate>,
) -> AppResult<ApiResponse<DictType>> {
    validate(&payload)?;
    let created = dict::create_type(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dict/types/:id - 更新字典类型
pub async fn update_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DictTypeUpdate>,
) -> AppResult<ApiResponse<DictType>> {
    let updated = dict::update_type(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dict/types - 批量删除字典类型（软删除）
pub async fn delete_types(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    dict::delete_types(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Serialize)]
pub struct DictTypeOption {
    pub id: i64,
    pub name: String,
}

/// GET /api/dict/types/options - 获取字典类型选择项
pub async fn type_options(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<DictTypeOption>>> {
    let options = dict::type_options(&state.pool)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(|(id, name)| DictTypeOption { id, name })
        .collect();
    Ok(ApiResponse::success(options))
}

/// POST /api/dict/types/details - 获取多个字典类型下的字典元素列表
pub async fn details_by_types(
    State(state): State<AppState>,
    Json(type_keys): Json<Vec<String>>,
) -> AppResult<ApiResponse<HashMap<String, Vec<DictDetail>>>> {
    let details = dict::details_by_types(&state.pool, &type_keys)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(details))
}

#[derive(Debug, Deserialize)]
pub struct DictDetailQuery {
    pub dict_type_id: Option<i64>,
    pub label: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dict/details - 获取单个字典类型下的字典元素列表，分页
pub async fn list_details(
    State(state): State<AppState>,
    Query(query): Query<DictDetailQuery>,
) -> AppResult<ApiResponse<Vec<DictDetail>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("dict_type_id", query.dict_type_id)
    .like_opt("label", query.label);
    let (details, total) = dict::list_details(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(details, total))
}

/// GET /api/dict/details/:id - 获取字典元素详情
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DictDetail>> {
    let row = dict::get_detail(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dict/details - 创建字典元素
pub async fn create_detail(
    State(state): State<AppState>,
    Json(payload): Json<DictDetailCreate>,
) -> AppResult<ApiResponse<DictDetail>> {
    validate(&payload)?;
    let created = dict::create_detail(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dict/details/:id - 更新字典元素
pub async fn update_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DictDetailUpdate>,
) -> AppResult<ApiResponse<DictDetail>> {
    let updated = dict::update_detail(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dict/details - 批量删除字典元素（硬删除）
pub async fn delete_details(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    dict::delete_details(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

/// GET /api/dict/genderoptions - 性别选择项
pub async fn gender_options() -> ApiResponse<Vec<LabelValue>> {
    ApiResponse::success(vec![
        LabelValue {
            label: "男",
            value: 0,
        },
        LabelValue {
            label: "女",
            value: 1,
        },
        LabelValue {
            label: "未知",
            value: 2,
        },
    ])
}
