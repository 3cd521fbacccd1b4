//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`users`] - 用户管理接口
//! - [`roles`] - 角色管理接口
//! - [`menus`] - 菜单管理接口
//! - [`depts`] - 部门管理接口
//! - [`dicts`] - 字典管理接口
//! - [`settings`] - 系统配置接口
//! - [`companies`] - 公司/店铺管理接口
//! - [`kitchens`] - 厨部管理接口
//! - [`tags`] - 标签管理接口
//! - [`dishes`] - 菜品/图片/成本卡管理接口
//! - [`groups`] - 菜品组管理接口
//! - [`combos`] - 套餐管理接口
//! - [`records`] - 操作/短信记录接口
//! - [`upload`] - 文件上传接口
//! - [`sms`] - 短信验证码接口

pub mod auth;
pub mod combos;
pub mod companies;
pub mod depts;
pub mod dicts;
pub mod dishes;
pub mod groups;
pub mod health;
pub mod kitchens;
pub mod menus;
pub mod records;
pub mod roles;
pub mod settings;
pub mod sms;
pub mod tags;
pub mod upload;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::AppState;
use shared::error::{AppError, AppResult};

/// Batch-id payload for delete endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct IdList {
    pub ids: Vec<i64>,
}

/// Label/value pair for option endpoints
#[derive(Debug, Clone, Serialize)]
pub struct LabelValue {
    pub label: &'static str,
    pub value: i64,
}

/// Validate an inbound payload, reporting the first violated field
pub fn validate(payload: &impl validator::Validate) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), message)
            });
        match detail {
            Some((field, message)) => {
                AppError::validation(format!("{field}: {message}")).with_detail("field", field)
            }
            None => AppError::validation("Validation failed"),
        }
    })
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(roles::router())
        .merge(menus::router())
        .merge(depts::router())
        .merge(dicts::router())
        .merge(settings::router())
        .merge(companies::router())
        .merge(kitchens::router())
        .merge(tags::router())
        .merge(dishes::router())
        .merge(groups::router())
        .merge(combos::router())
        .merge(records::router())
        .merge(upload::router())
        .merge(sms::router())
}

/// Build the fully layered application
///
/// Layer order matters: the auth middleware is outermost so the operation
/// log already sees the authenticated user in the request extensions.
pub fn build_app(state: &AppState) -> Router<AppState> {
    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Operation log capture (inside auth)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::oplog::middleware::record_operations,
        ))
        // JWT authentication + per-request permission resolution (outermost)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
}
