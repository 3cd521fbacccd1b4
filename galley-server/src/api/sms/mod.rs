//! SMS API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/sms", routes())
}

fn routes() -> Router<AppState> {
    Router::new().route("/send", post(handler::send_code))
}
