//! Role API Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::api::{IdList, validate};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::dao::{PageParams, QuerySpec};
use crate::db::repository::{menu, role};
use crate::db::tree::{self, PickNode};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Role, RoleCreate, RoleOut, RoleUpdate};

/// Query filter for role listing
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub name: Option<String>,
    pub role_key: Option<String>,
    pub disabled: Option<bool>,
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl RoleQuery {
    fn to_spec(&self) -> QuerySpec {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
        .to_spec()
        .like_opt("name", self.name.clone())
        .like_opt("role_key", self.role_key.clone())
        .eq_opt("disabled", self.disabled)
        .fuzzy_opt(self.fuzzy.clone())
    }
}

/// GET /api/roles - 获取角色列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<ApiResponse<Vec<Role>>> {
    let (roles, total) = role::list(&state.pool, &query.to_spec())
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(roles, total))
}

/// GET /api/roles/options - 获取角色选择项
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<role::RoleOption>>> {
    let options = role::options(&state.pool).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(options))
}

/// GET /api/roles/:id - 获取角色信息（含菜单/部门关联）
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<RoleOut>> {
    let out = role::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(out))
}

/// POST /api/roles - 创建角色
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<ApiResponse<Role>> {
    validate(&payload)?;
    tracing::info!(operator_id = current.id, role = %payload.name, "Creating role");
    let created = role::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/roles/:id - 更新角色
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<ApiResponse<Role>> {
    tracing::info!(operator_id = current.id, role_id = id, "Updating role");
    let updated = role::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/roles - 批量删除角色（硬删除，存在用户关联则无法删除）
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tracing::info!(operator_id = current.id, ids = ?ids.ids, "Deleting roles");
    role::delete(&state.pool, &ids.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Serialize)]
pub struct RoleMenuTree {
    pub menus: Vec<PickNode>,
    pub checked_ids: Vec<i64>,
}

/// GET /api/roles/:id/menus/tree - 菜单选择树 + 角色已关联的菜单 ID
pub async fn menu_tree(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<RoleMenuTree>> {
    // 404 for unknown roles before building anything
    role::get(&state.pool, id).await.map_err(AppError::from)?;

    let rows = menu::all_live(&state.pool).await.map_err(AppError::from)?;
    let checked: Vec<i64> = role::menu_ids(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    let selected = checked.iter().copied().collect();

    Ok(ApiResponse::success(RoleMenuTree {
        menus: tree::build_pick_tree(&rows, &selected),
        checked_ids: checked,
    }))
}
