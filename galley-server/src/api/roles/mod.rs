//! Role API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/roles", routes())
}

fn routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission(&["auth.role.list"])));

    let option_routes = Router::new()
        .route("/options", get(handler::options))
        .layer(middleware::from_fn(require_permission(&[
            "auth.user.create",
            "auth.user.update",
        ])));

    let view_routes = Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/menus/tree", get(handler::menu_tree))
        .layer(middleware::from_fn(require_permission(&[
            "auth.role.view",
            "auth.role.update",
        ])));

    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_permission(&["auth.role.create"])));

    let update_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(&["auth.role.update"])));

    let delete_routes = Router::new()
        .route("/", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(&["auth.role.delete"])));

    read_routes
        .merge(option_routes)
        .merge(view_routes)
        .merge(write_routes)
        .merge(update_routes)
        .merge(delete_routes)
}
