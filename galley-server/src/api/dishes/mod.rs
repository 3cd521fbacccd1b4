//! Dish API 模块
//!
//! 菜品本体、产品图片、成本卡、菜品店铺和发布流转接口。

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/dish", dish_routes())
        .nest("/api/image", image_routes())
        .nest("/api/dishbom", bom_routes())
        .nest("/api/branchdish", branch_routes())
        .route("/api/dishstatusoptions", get(handler::status_options))
}

fn dish_routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission(&["product.dish.list"])));

    let view_routes = Router::new()
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(&["product.dish.view"])));

    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route("/import", post(handler::import))
        .layer(middleware::from_fn(require_permission(&[
            "product.dish.create",
        ])));

    let update_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .route("/{id}/upload", post(handler::upload))
        .route("/{id}/online", post(handler::online))
        .route("/{id}/offline", post(handler::offline))
        .layer(middleware::from_fn(require_permission(&[
            "product.dish.update",
        ])));

    let delete_routes = Router::new()
        .route("/", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(&[
            "product.dish.delete",
        ])));

    read_routes
        .merge(view_routes)
        .merge(write_routes)
        .merge(update_routes)
        .merge(delete_routes)
}

fn image_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_images)
                .post(handler::create_image)
                .delete(handler::delete_images),
        )
        .route(
            "/{id}",
            get(handler::get_image).put(handler::update_image),
        )
}

fn bom_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_boms)
                .post(handler::create_bom)
                .delete(handler::delete_boms),
        )
        .route("/{id}", get(handler::get_bom).put(handler::update_bom))
}

fn branch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_branch_dishes)
                .post(handler::create_branch_dish)
                .delete(handler::delete_branch_dishes),
        )
        .route(
            "/{id}",
            get(handler::get_branch_dish).put(handler::update_branch_dish),
        )
}
