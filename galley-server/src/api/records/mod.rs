//! Record API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/record", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/operations", get(handler::list_operations))
        .route("/sms", get(handler::list_sms))
}
