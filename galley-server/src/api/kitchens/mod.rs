//! Kitchen API 模块 (厨部)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/kitchen", kitchen_routes())
        .nest("/api/kitchenbranch", link_routes())
}

fn kitchen_routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(&[
            "product.kitchen.list",
        ])));

    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(&[
            "product.kitchen.create",
            "product.kitchen.update",
        ])));

    let delete_routes = Router::new()
        .route("/", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(&[
            "product.kitchen.delete",
        ])));

    read_routes.merge(write_routes).merge(delete_routes)
}

fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_links)
                .post(handler::create_link)
                .delete(handler::delete_links),
        )
        .route("/{id}", get(handler::get_link).put(handler::update_link))
}
