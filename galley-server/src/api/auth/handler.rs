//! Auth API Handlers

use axum::Json;
use axum::extract::{Extension, State};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, PermissionSet};
use crate::core::AppState;
use crate::db::repository::record::OperationEntry;
use crate::db::repository::role::SUPERUSER_ROLE_ID;
use crate::db::repository::user::{self, SUPERUSER_ID};
use crate::security_log;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{User, UserOut};

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub telephone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SmsLoginPayload {
    pub telephone: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserOut,
}

/// POST /api/auth/login - 手机号 + 密码登录
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let account = user::get_by_telephone(&state.pool, &payload.telephone)
        .await
        .map_err(AppError::from)?;

    let Some(account) = account else {
        record_login(&state, &payload.telephone, None, false);
        security_log!("WARN", "login_unknown_phone", telephone = payload.telephone.clone());
        return Err(AppError::new(ErrorCode::UserNotFound));
    };

    if !user::verify_password(&payload.password, &account.password_hash) {
        record_login(&state, &payload.telephone, Some(&account), false);
        security_log!(
            "WARN",
            "login_failed",
            telephone = payload.telephone.clone(),
            user_id = account.id
        );
        return Err(AppError::invalid_credentials());
    }

    finish_login(&state, account).await
}

/// POST /api/auth/login/sms - 手机号 + 短信验证码登录
pub async fn login_sms(
    State(state): State<AppState>,
    Json(payload): Json<SmsLoginPayload>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let account = user::get_by_telephone(&state.pool, &payload.telephone)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if let Err(e) = state.sms.verify_code(&payload.telephone, &payload.code) {
        record_login(&state, &payload.telephone, Some(&account), false);
        return Err(e);
    }

    finish_login(&state, account).await
}

async fn finish_login(
    state: &AppState,
    account: User,
) -> AppResult<ApiResponse<LoginResponse>> {
    if !account.is_active {
        record_login(state, &account.telephone, Some(&account), false);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let role_ids = user::role_ids(&state.pool, account.id)
        .await
        .map_err(AppError::from)?;
    let dept_ids = user::dept_ids(&state.pool, account.id)
        .await
        .map_err(AppError::from)?;

    let current = CurrentUser {
        id: account.id,
        telephone: account.telephone.clone(),
        name: account.name.clone(),
        is_superuser: account.id == SUPERUSER_ID || role_ids.contains(&SUPERUSER_ROLE_ID),
    };
    let token = state
        .jwt
        .generate_token(&current)
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))?;

    user::touch_last_login(&state.pool, account.id)
        .await
        .map_err(AppError::from)?;
    record_login(state, &account.telephone, Some(&account), true);

    tracing::info!(user_id = account.id, telephone = %account.telephone, "User logged in");

    Ok(ApiResponse::success(LoginResponse {
        token,
        user: UserOut {
            user: account,
            role_ids,
            dept_ids,
        },
    }))
}

/// POST /api/auth/logout - 登出
///
/// 令牌是无状态的；登出只落一条操作记录，由中间件完成。
pub async fn logout(Extension(current): Extension<CurrentUser>) -> ApiResponse<String> {
    tracing::info!(user_id = current.id, "User logged out");
    ApiResponse::message("已登出")
}

#[derive(Debug, Serialize)]
pub struct CurrentInfo {
    #[serde(flatten)]
    pub user: UserOut,
    pub permissions: Vec<String>,
}

/// GET /api/auth/current/info - 当前用户信息（含解析后的权限）
pub async fn current_info(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Extension(permissions): Extension<PermissionSet>,
) -> AppResult<ApiResponse<CurrentInfo>> {
    let out = user::get(&state.pool, current.id).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(CurrentInfo {
        user: out,
        permissions: permissions.into_sorted_vec(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordPayload {
    pub old_password: String,
    pub new_password: String,
}

/// POST /api/auth/current/reset/password - 重置当前用户密码
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ResetPasswordPayload>,
) -> AppResult<ApiResponse<String>> {
    if payload.new_password.len() < 6 {
        return Err(AppError::validation("password must be at least 6 characters"));
    }

    let account = user::get_user(&state.pool, current.id)
        .await
        .map_err(AppError::from)?;
    if !user::verify_password(&payload.old_password, &account.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    user::set_password(&state.pool, current.id, &payload.new_password)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::message("密码已更新"))
}

/// 登录尝试写入操作日志（成功与失败都记录）
fn record_login(state: &AppState, telephone: &str, account: Option<&User>, success: bool) {
    state.oplog.log(OperationEntry {
        telephone: Some(telephone.to_string()),
        user_id: account.map(|a| a.id),
        user_name: account.map(|a| a.name.clone()),
        status_code: Some(if success { 200 } else { 401 }),
        request_method: Some("POST".to_string()),
        api_path: Some("/api/auth/login".to_string()),
        summary: Some("用户登录".to_string()),
        operation_content: Some(if success { "登录" } else { "登录失败" }.to_string()),
        ..Default::default()
    });
}
