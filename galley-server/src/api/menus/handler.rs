//! Menu API Handlers
//!
//! 列表接口返回树形结构而非分页行；三种树形态见 [`crate::db::tree`]。

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, validate};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::repository::menu;
use crate::db::tree::{self, OptionNode, PickNode, TreeNode};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Menu, MenuCreate, MenuUpdate};

/// GET /api/menus - 菜单树（展示形态）
pub async fn list_tree(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<TreeNode<Menu>>>> {
    let rows = menu::all_live(&state.pool).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(tree::build_display_tree(&rows)))
}

#[derive(Debug, Deserialize)]
pub struct TreeOptionQuery {
    /// 编辑节点时排除其自身子树，防止选择成环的父节点
    pub exclude_id: Option<i64>,
}

/// GET /api/menus/tree/options - 菜单树选择项（选择父节点）
pub async fn tree_options(
    State(state): State<AppState>,
    Query(query): Query<TreeOptionQuery>,
) -> AppResult<ApiResponse<Vec<OptionNode>>> {
    let rows = menu::all_live(&state.pool).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(tree::build_option_tree(
        &rows,
        query.exclude_id,
    )))
}

/// GET /api/menus/role/tree/options - 菜单选择树（角色授权使用，无预选）
pub async fn role_tree_options(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PickNode>>> {
    let rows = menu::all_live(&state.pool).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(tree::build_pick_tree(
        &rows,
        &Default::default(),
    )))
}

/// GET /api/menus/:id - 获取菜单信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Menu>> {
    let row = menu::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/menus - 创建菜单
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<ApiResponse<Menu>> {
    validate(&payload)?;
    tracing::info!(operator_id = current.id, title = %payload.title, "Creating menu");
    let created = menu::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/menus/:id - 更新菜单（变更父节点时做成环检查）
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<ApiResponse<Menu>> {
    let updated = menu::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/menus - 批量删除菜单（硬删除，存在角色关联或子菜单则无法删除）
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tracing::info!(operator_id = current.id, ids = ?ids.ids, "Deleting menus");
    menu::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
