//! Record API Handlers

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::record;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{OperationRecord, SmsRecord};

#[derive(Debug, Deserialize)]
pub struct OperationQuery {
    pub telephone: Option<String>,
    pub request_method: Option<String>,
    pub api_path: Option<String>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/record/operations - 获取操作记录列表
pub async fn list_operations(
    State(state): State<AppState>,
    Query(query): Query<OperationQuery>,
) -> AppResult<ApiResponse<Vec<OperationRecord>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("telephone", query.telephone)
    .eq_opt("request_method", query.request_method.map(|m| m.to_uppercase()))
    .like_opt("api_path", query.api_path)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = record::list_operations(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

#[derive(Debug, Deserialize)]
pub struct SmsQuery {
    pub telephone: Option<String>,
    pub scene: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/record/sms - 获取短信发送记录列表
pub async fn list_sms(
    State(state): State<AppState>,
    Query(query): Query<SmsQuery>,
) -> AppResult<ApiResponse<Vec<SmsRecord>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("telephone", query.telephone)
    .eq_opt("scene", query.scene);
    let (rows, total) = record::list_sms(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}
