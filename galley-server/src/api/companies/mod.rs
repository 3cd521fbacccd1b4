//! Company / Branch API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/company", company_routes())
        .nest("/api/branch", branch_routes())
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::delete),
        )
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}

fn branch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_branches)
                .post(handler::create_branch)
                .delete(handler::delete_branches),
        )
        .route(
            "/{id}",
            get(handler::get_branch).put(handler::update_branch),
        )
}
