//! SMS API Handlers

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::core::AppState;
use crate::db::repository::{record, user};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct SendCodePayload {
    pub telephone: String,
}

/// POST /api/sms/send - 发送短信验证码
///
/// 手机号必须属于已注册用户；发送结果落短信记录表。
pub async fn send_code(
    State(state): State<AppState>,
    Json(payload): Json<SendCodePayload>,
) -> AppResult<ApiResponse<String>> {
    let account = user::get_by_telephone(&state.pool, &payload.telephone)
        .await
        .map_err(AppError::from)?;
    if account.is_none() {
        return Err(AppError::new(ErrorCode::UserNotFound));
    }

    match state.sms.send_code(&payload.telephone).await {
        Ok(content) => {
            record::insert_sms(&state.pool, &payload.telephone, &content, true, "login_code")
                .await
                .map_err(AppError::from)?;
            Ok(ApiResponse::message("验证码已发送"))
        }
        Err(e) => {
            record::insert_sms(&state.pool, &payload.telephone, &e.message, false, "login_code")
                .await
                .map_err(AppError::from)?;
            Err(e)
        }
    }
}
