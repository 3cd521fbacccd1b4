//! Combo API 模块 (套餐)

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/dishcomboseries", series_routes())
        .nest("/api/dishcombo", combo_routes())
        .nest("/api/dishcombodetail", item_routes())
        .route("/api/dishcombostatusoptions", get(handler::status_options))
}

fn series_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_series)
                .post(handler::create_series)
                .delete(handler::delete_series),
        )
        .route(
            "/{id}",
            get(handler::get_series).put(handler::update_series),
        )
}

fn combo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::delete),
        )
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_items)
                .post(handler::create_item)
                .delete(handler::delete_items),
        )
        .route("/{id}", get(handler::get_item).put(handler::update_item))
}
