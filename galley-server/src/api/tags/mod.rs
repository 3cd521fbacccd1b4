//! Tag API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/tag", tag_routes())
        .nest("/api/tagging", tagging_routes())
}

fn tag_routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(&["product.tag.list"])));

    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(&[
            "product.tag.create",
            "product.tag.update",
        ])));

    let delete_routes = Router::new()
        .route("/", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(&[
            "product.tag.delete",
        ])));

    read_routes.merge(write_routes).merge(delete_routes)
}

fn tagging_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_taggings)
                .post(handler::create_tagging)
                .delete(handler::delete_taggings),
        )
        .route(
            "/{id}",
            get(handler::get_tagging).put(handler::update_tagging),
        )
}
