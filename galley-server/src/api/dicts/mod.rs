//! Dictionary API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/dict", routes())
}

// 字典接口登录即可使用
fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/types",
            get(handler::list_types)
                .post(handler::create_type)
                .delete(handler::delete_types),
        )
        .route("/types/options", get(handler::type_options))
        .route("/types/details", post(handler::details_by_types))
        .route(
            "/types/{id}",
            get(handler::get_type).put(handler::update_type),
        )
        .route(
            "/details",
            get(handler::list_details)
                .post(handler::create_detail)
                .delete(handler::delete_details),
        )
        .route(
            "/details/{id}",
            get(handler::get_detail).put(handler::update_detail),
        )
        .route("/genderoptions", get(handler::gender_options))
}
