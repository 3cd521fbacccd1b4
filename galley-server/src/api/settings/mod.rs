//! Settings API 模块

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/settings", routes())
}

// base/config、privacy、agreement 为公开路由（认证中间件放行）
fn routes() -> Router<AppState> {
    Router::new()
        .route("/tabs", post(handler::tabs))
        .route("/tabs/values", get(handler::tab_values))
        .route("/tabs/values", put(handler::update_values))
        .route("/base/config", get(handler::base_config))
        .route("/privacy", get(handler::privacy))
        .route("/agreement", get(handler::agreement))
}
