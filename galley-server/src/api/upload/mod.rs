//! Upload API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/upload", routes())
        .route("/api/uploads/{subdir}/{filename}", get(handler::serve))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/image", post(handler::upload_image))
        .route("/file", post(handler::upload_file))
}
