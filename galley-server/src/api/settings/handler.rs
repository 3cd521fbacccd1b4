//! Settings API Handlers

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::AppState;
use crate::db::repository::setting;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{SettingEntry, SettingTab};

/// POST /api/settings/tabs - 获取系统配置标签列表
pub async fn tabs(
    State(state): State<AppState>,
    Json(classifys): Json<Vec<String>>,
) -> AppResult<ApiResponse<Vec<SettingTab>>> {
    let tabs = setting::tabs_by_classify(&state.pool, &classifys)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(tabs))
}

#[derive(Debug, Deserialize)]
pub struct TabValuesQuery {
    pub tab_id: i64,
}

/// GET /api/settings/tabs/values - 获取系统配置标签下的信息
pub async fn tab_values(
    State(state): State<AppState>,
    Query(query): Query<TabValuesQuery>,
) -> AppResult<ApiResponse<Vec<SettingEntry>>> {
    let entries = setting::entries_by_tab(&state.pool, query.tab_id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(entries))
}

/// PUT /api/settings/tabs/values - 更新系统配置信息
///
/// 未知的配置键让整批失败，不做部分更新。
pub async fn update_values(
    State(state): State<AppState>,
    Json(values): Json<HashMap<String, Option<String>>>,
) -> AppResult<ApiResponse<u64>> {
    let updated = setting::update_values(&state.pool, &values)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// GET /api/settings/base/config - 获取系统基础配置（公开，每次进入系统时使用）
pub async fn base_config(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<HashMap<String, Option<String>>>> {
    let config = setting::base_config(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(config))
}

/// GET /api/settings/privacy - 获取隐私协议（公开）
pub async fn privacy(State(state): State<AppState>) -> AppResult<ApiResponse<Option<String>>> {
    let entry = setting::get_by_key(&state.pool, "web_privacy")
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(entry.value))
}

/// GET /api/settings/agreement - 获取用户协议（公开）
pub async fn agreement(State(state): State<AppState>) -> AppResult<ApiResponse<Option<String>>> {
    let entry = setting::get_by_key(&state.pool, "web_agreement")
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(entry.value))
}
