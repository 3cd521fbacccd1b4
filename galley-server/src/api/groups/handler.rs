//! Dish Group API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, LabelValue, validate};
use crate::core::AppState;
use crate::db::dao::PageParams;
use crate::db::repository::group;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{
    DishGroup, DishGroupCreate, DishGroupItem, DishGroupItemCreate, DishGroupItemUpdate,
    DishGroupUpdate, GroupType, GroupTypeCreate, GroupTypeUpdate,
};

/// GET /api/dishgroupstypeoptions - 菜品分组类型选择项
pub async fn stype_options() -> ApiResponse<Vec<LabelValue>> {
    ApiResponse::success(vec![
        LabelValue {
            label: "固定",
            value: 2,
        },
        LabelValue {
            label: "必选",
            value: 1,
        },
        LabelValue {
            label: "可选",
            value: 0,
        },
    ])
}

#[derive(Debug, Deserialize)]
pub struct GroupTypeQuery {
    pub name: Option<String>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishgrouptype - 获取菜品分组类型列表
pub async fn list_types(
    State(state): State<AppState>,
    Query(query): Query<GroupTypeQuery>,
) -> AppResult<ApiResponse<Vec<GroupType>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = group::list_types(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishgrouptype/:id - 获取菜品分组类型信息
pub async fn get_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<GroupType>> {
    let row = group::get_type(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishgrouptype - 创建菜品分组类型
pub async fn create_type(
    State(state): State<AppState>,
    Json(payload): Json<GroupTypeCreate>,
) -> AppResult<ApiResponse<GroupType>> {
    validate(&payload)?;
    let created = group::create_type(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishgrouptype/:id - 更新菜品分组类型
pub async fn update_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<GroupTypeUpdate>,
) -> AppResult<ApiResponse<GroupType>> {
    let updated = group::update_type(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishgrouptype - 删除菜品分组类型（硬删除，被分组引用则无法删除）
pub async fn delete_types(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    group::delete_types(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct GroupQuery {
    pub name: Option<String>,
    pub group_type_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub stype: Option<i64>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishgroup - 获取菜品分组列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<ApiResponse<Vec<DishGroup>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .like_opt("name", query.name)
    .eq_opt("group_type_id", query.group_type_id)
    .eq_opt("branch_id", query.branch_id)
    .eq_opt("stype", query.stype)
    .fuzzy_opt(query.fuzzy);
    let (rows, total) = group::list(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishgroup/:id - 获取菜品分组信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DishGroup>> {
    let row = group::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishgroup - 创建菜品分组
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DishGroupCreate>,
) -> AppResult<ApiResponse<DishGroup>> {
    validate(&payload)?;
    let created = group::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishgroup/:id - 更新菜品分组
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishGroupUpdate>,
) -> AppResult<ApiResponse<DishGroup>> {
    let updated = group::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishgroup - 删除菜品分组（硬删除，被套餐引用则无法删除）
pub async fn delete(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    group::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct GroupItemQuery {
    pub group_id: Option<i64>,
    pub dish_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/dishgroupdetail - 获取菜品分组明细列表
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<GroupItemQuery>,
) -> AppResult<ApiResponse<Vec<DishGroupItem>>> {
    let spec = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .to_spec()
    .eq_opt("group_id", query.group_id)
    .eq_opt("dish_id", query.dish_id);
    let (rows, total) = group::list_items(&state.pool, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(rows, total))
}

/// GET /api/dishgroupdetail/:id - 获取菜品分组明细信息
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DishGroupItem>> {
    let row = group::get_item(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/dishgroupdetail - 创建菜品分组明细
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<DishGroupItemCreate>,
) -> AppResult<ApiResponse<DishGroupItem>> {
    let created = group::create_item(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/dishgroupdetail/:id - 更新菜品分组明细
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishGroupItemUpdate>,
) -> AppResult<ApiResponse<DishGroupItem>> {
    let updated = group::update_item(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/dishgroupdetail - 删除菜品分组明细（硬删除）
pub async fn delete_items(
    State(state): State<AppState>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    group::delete_items(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
