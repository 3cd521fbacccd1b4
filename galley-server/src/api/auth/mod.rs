//! Auth API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/login/sms", post(handler::login_sms))
        .route("/logout", post(handler::logout))
        .route("/current/info", get(handler::current_info))
        .route("/current/reset/password", post(handler::reset_password))
}
