//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService, resolver};
use crate::core::AppState;
use crate::security_log;
use shared::error::AppError;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。验证成功后将
/// [`CurrentUser`] 和本次请求重新计算的权限集合注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - 登录、健康检查和公开配置接口
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::not_authenticated());
        }
    };

    let claims = state.jwt.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{e}"),
            uri = format!("{:?}", req.uri())
        );
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))?;

    // 权限每请求重新计算，不做缓存
    let permissions = resolver::resolve(&state.pool, &user).await?;

    req.extensions_mut().insert(user);
    req.extensions_mut().insert(permissions);
    Ok(next.run(req).await)
}

fn is_public_route(path: &str) -> bool {
    matches!(
        path,
        "/api/auth/login"
            | "/api/auth/login/sms"
            | "/api/health"
            | "/api/settings/base/config"
            | "/api/settings/privacy"
            | "/api/settings/agreement"
    )
}

/// 权限检查中间件 - 要求任一指定权限
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/dishes", get(handler::list))
///     .layer(middleware::from_fn(require_permission(&["product.dish.list"])));
/// ```
///
/// # 错误
///
/// 无权限返回 403，响应消息不透露缺失的权限名。
pub fn require_permission(
    permissions: &'static [&'static str],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;
            let resolved = req
                .extensions()
                .get::<resolver::PermissionSet>()
                .ok_or_else(AppError::not_authenticated)?;

            if !permissions.iter().any(|p| resolved.allows(p)) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    telephone = user.telephone.clone(),
                    required = permissions.join("|")
                );
                return Err(AppError::permission_denied());
            }

            Ok(next.run(req).await)
        })
    }
}
