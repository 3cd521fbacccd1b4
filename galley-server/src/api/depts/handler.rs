//! Department API Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use serde::Deserialize;

use crate::api::{IdList, validate};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::repository::{dept, user};
use crate::db::tree::{self, OptionNode, PickNode, TreeNode};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Dept, DeptCreate, DeptUpdate};

/// GET /api/depts - 部门树（展示形态）
pub async fn list_tree(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<TreeNode<Dept>>>> {
    let rows = dept::all_live(&state.pool).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(tree::build_display_tree(&rows)))
}

#[derive(Debug, Deserialize)]
pub struct TreeOptionQuery {
    pub exclude_id: Option<i64>,
}

/// GET /api/depts/tree/options - 部门树选择项（选择父节点）
pub async fn tree_options(
    State(state): State<AppState>,
    Query(query): Query<TreeOptionQuery>,
) -> AppResult<ApiResponse<Vec<OptionNode>>> {
    let rows = dept::all_live(&state.pool).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(tree::build_option_tree(
        &rows,
        query.exclude_id,
    )))
}

#[derive(Debug, Deserialize)]
pub struct UserTreeQuery {
    /// 预选该用户已关联的部门
    pub user_id: Option<i64>,
}

/// GET /api/depts/user/tree/options - 部门选择树（添加/修改用户时使用）
pub async fn user_tree_options(
    State(state): State<AppState>,
    Query(query): Query<UserTreeQuery>,
) -> AppResult<ApiResponse<Vec<PickNode>>> {
    let rows = dept::all_live(&state.pool).await.map_err(AppError::from)?;
    let selected = match query.user_id {
        Some(user_id) => user::dept_ids(&state.pool, user_id)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .collect(),
        None => Default::default(),
    };
    Ok(ApiResponse::success(tree::build_pick_tree(&rows, &selected)))
}

/// GET /api/depts/:id - 获取部门信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Dept>> {
    let row = dept::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(row))
}

/// POST /api/depts - 创建部门
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<DeptCreate>,
) -> AppResult<ApiResponse<Dept>> {
    validate(&payload)?;
    tracing::info!(operator_id = current.id, name = %payload.name, "Creating dept");
    let created = dept::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/depts/:id - 更新部门（变更父节点时做成环检查）
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DeptUpdate>,
) -> AppResult<ApiResponse<Dept>> {
    let updated = dept::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/depts - 批量删除部门（硬删除，存在关联或子部门则无法删除）
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tracing::info!(operator_id = current.id, ids = ?ids.ids, "Deleting depts");
    dept::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}
