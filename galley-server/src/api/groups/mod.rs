//! Dish Group API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/dishgrouptype", type_routes())
        .nest("/api/dishgroup", group_routes())
        .nest("/api/dishgroupdetail", item_routes())
        .route("/api/dishgroupstypeoptions", get(handler::stype_options))
}

fn type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_types)
                .post(handler::create_type)
                .delete(handler::delete_types),
        )
        .route("/{id}", get(handler::get_type).put(handler::update_type))
}

fn group_routes() -> Router<AppState> {
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
