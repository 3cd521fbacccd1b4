//! Menu API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/menus", routes())
}

fn routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list_tree))
        .layer(middleware::from_fn(require_permission(&["auth.menu.list"])));

    let option_routes = Router::new()
        .route("/tree/options", get(handler::tree_options))
        .layer(middleware::from_fn(require_permission(&[
            "auth.menu.create",
            "auth.menu.update",
        ])));

    let role_tree_routes = Router::new()
        .route("/role/tree/options", get(handler::role_tree_options))
        .layer(middleware::from_fn(require_permission(&[
            "auth.role.create",
            "auth.role.update",
        ])));

    let view_routes = Router::new()
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(&[
            "auth.menu.view",
            "auth.menu.update",
        ])));

    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_permission(&["auth.menu.create"])));

    let update_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(&["auth.menu.update"])));

    let delete_routes = Router::new()
        .route("/", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(&["auth.menu.delete"])));

    read_routes
        .merge(option_routes)
        .merge(role_tree_routes)
        .merge(view_routes)
        .merge(write_routes)
        .merge(update_routes)
        .merge(delete_routes)
}
