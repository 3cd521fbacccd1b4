//! Upload API Handlers
//!
//! multipart 请求，字段名必须为 `file`。重复内容按哈希去重，
//! 始终返回第一次存储的文件。

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::auth::CurrentUser;
use crate::core::AppState;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::UploadFile;

async fn read_file_field(multipart: &mut Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .ok_or_else(|| AppError::validation("No filename provided in file field"))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                .to_vec();
            return Ok((filename, data));
        }
    }
    Err(AppError::validation(
        "No 'file' field found. Field name must be 'file'",
    ))
}

/// POST /api/upload/image - 上传图片（转存为 JPEG）
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadFile>> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    tracing::info!(operator_id = current.id, %filename, "Uploading image");

    let stored = state
        .storage
        .save_image(&state.pool, &filename, data)
        .await?;
    Ok(ApiResponse::success(stored))
}

/// POST /api/upload/file - 上传任意文件
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadFile>> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    tracing::info!(operator_id = current.id, %filename, "Uploading file");

    let stored = state
        .storage
        .save_file(&state.pool, &filename, data)
        .await?;
    Ok(ApiResponse::success(stored))
}

/// GET /api/uploads/:subdir/:filename - 读取已存储的上传文件
pub async fn serve(
    State(state): State<AppState>,
    Path((subdir, filename)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    // Stored names are uuid.ext; anything else is not ours
    if subdir.contains(['/', '\\', '.']) || filename.contains(['/', '\\']) || filename.contains("..")
    {
        return Err(AppError::not_found("file"));
    }

    let path = state.storage.root().join(&subdir).join(&filename);
    let data = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::not_found("file"))?;

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], data))
}
