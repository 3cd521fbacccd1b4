//! User API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission(&["auth.user.list"])));

    let view_routes = Router::new()
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(&[
            "auth.user.view",
            "auth.user.update",
        ])));

    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_permission(&["auth.user.create"])));

    let update_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(&["auth.user.update"])));

    let delete_routes = Router::new()
        .route("/", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(&["auth.user.delete"])));

    let import_routes = Router::new()
        .route("/import", post(handler::import))
        .route("/import/template", get(handler::import_template))
        .layer(middleware::from_fn(require_permission(&["auth.user.import"])));

    let export_routes = Router::new()
        .route("/export", post(handler::export))
        .layer(middleware::from_fn(require_permission(&["auth.user.export"])));

    let reset_routes = Router::new()
        .route("/init/password/send/sms", post(handler::init_password_send_sms))
        .layer(middleware::from_fn(require_permission(&["auth.user.reset"])));

    read_routes
        .merge(view_routes)
        .merge(write_routes)
        .merge(update_routes)
        .merge(delete_routes)
        .merge(import_routes)
        .merge(export_routes)
        .merge(reset_routes)
}
