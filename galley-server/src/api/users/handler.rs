//! User API Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use rand::Rng;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::{IdList, validate};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::dao::{Dao, ExportSheet, PageParams, QuerySpec};
use crate::db::repository::record;
use crate::db::repository::user::{self, IMPORT_HEADERS};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{User, UserCreate, UserOut, UserUpdate};

/// Query filter for user listing
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub is_active: Option<bool>,
    /// 模糊查询（姓名/昵称/手机号）
    pub fuzzy: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl UserQuery {
    fn to_spec(&self) -> QuerySpec {
        let page = PageParams {
            page: self.page,
            limit: self.limit,
        }
        .to_spec();
        page.like_opt("name", self.name.clone())
            .like_opt("telephone", self.telephone.clone())
            .eq_opt("is_active", self.is_active)
            .fuzzy_opt(self.fuzzy.clone())
    }
}

/// GET /api/users - 获取用户列表
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<ApiResponse<Vec<UserOut>>> {
    let (users, total) = user::list(&state.pool, &query.to_spec())
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::page(users, total))
}

/// GET /api/users/:id - 获取用户信息
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<UserOut>> {
    let out = user::get(&state.pool, id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(out))
}

/// POST /api/users - 创建用户
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<ApiResponse<User>> {
    validate(&payload)?;
    tracing::info!(
        operator_id = current.id,
        telephone = %payload.telephone,
        "Creating user"
    );
    let created = user::create(&state.pool, payload, &state.config.default_password)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/users/:id - 更新用户信息
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<ApiResponse<User>> {
    let updated = user::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/users - 批量删除用户（软删除，清空角色关联）
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tracing::info!(operator_id = current.id, ids = ?ids.ids, "Deleting users");
    user::delete(&state.pool, &ids.ids, current.id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("删除成功"))
}

#[derive(Debug, Deserialize)]
pub struct ImportPayload {
    pub rows: Vec<Map<String, Value>>,
}

/// POST /api/users/import - 批量导入用户
///
/// 整批一个事务；任何一行缺必填字段时整批回滚。
pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<ImportPayload>,
) -> AppResult<ApiResponse<u64>> {
    // Imported accounts start with the configured default password
    let password_hash = user::hash_password(&state.config.default_password).map_err(AppError::from)?;
    let rows: Vec<Map<String, Value>> = payload
        .rows
        .into_iter()
        .map(|mut row| {
            row.insert("password_hash".to_string(), Value::String(password_hash.clone()));
            row
        })
        .collect();

    let mut headers = IMPORT_HEADERS.to_vec();
    headers.push(crate::db::dao::ImportColumn {
        label: "密码",
        field: "password_hash",
        required: true,
    });

    let inserted = Dao::<User>::new(&state.pool)
        .import(&headers, &rows)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(inserted))
}

/// GET /api/users/import/template - 下载批量导入表头模板
pub async fn import_template() -> ApiResponse<Vec<crate::db::dao::ImportColumn>> {
    ApiResponse::success(IMPORT_HEADERS.to_vec())
}

/// POST /api/users/export - 导出用户查询列表
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<ApiResponse<ExportSheet>> {
    // Export ignores pagination: the whole filtered set goes out
    let mut spec = query.to_spec();
    spec.limit = 0;
    spec.offset = 0;
    let sheet = Dao::<User>::new(&state.pool)
        .export(IMPORT_HEADERS, &spec)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(sheet))
}

/// POST /api/users/init/password/send/sms - 初始化所选用户密码并短信通知
pub async fn init_password_send_sms(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(ids): Json<IdList>,
) -> AppResult<ApiResponse<String>> {
    tracing::info!(operator_id = current.id, ids = ?ids.ids, "Initializing passwords");

    for id in &ids.ids {
        let account = user::get_user(&state.pool, *id).await.map_err(AppError::from)?;
        let password = random_password();
        user::set_password(&state.pool, *id, &password)
            .await
            .map_err(AppError::from)?;

        let content = format!("【Galley】您的初始密码为 {password}，请尽快登录修改。");
        let sent = state.sms.send_text(&account.telephone, &content).await.is_ok();
        record::insert_sms(&state.pool, &account.telephone, &content, sent, "init_password")
            .await
            .map_err(AppError::from)?;
    }

    Ok(ApiResponse::message("密码已初始化并通知"))
}

fn random_password() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000u32))
}
