//! Department API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/depts", routes())
}

// 部门接口登录即可使用，不挂权限层
fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_tree).post(handler::create).delete(handler::delete))
        .route("/tree/options", get(handler::tree_options))
        .route("/user/tree/options", get(handler::user_tree_options))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}
