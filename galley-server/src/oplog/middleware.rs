//! Request-capture middleware for the operation log

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::repository::record::OperationEntry;

/// Record mutating API requests (POST/PUT/DELETE) to the operation log
///
/// Runs inside the auth middleware so the request extensions already carry
/// [`CurrentUser`] for authenticated calls. Reads are not recorded; login
/// attempts are written by the auth handler itself with richer context.
pub async fn record_operations(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let recordable = path.starts_with("/api/")
        && (method == http::Method::POST
            || method == http::Method::PUT
            || method == http::Method::DELETE)
        && path != "/api/auth/login"
        && path != "/api/auth/login/sms";

    if !recordable {
        return next.run(req).await;
    }

    let user = req.extensions().get::<CurrentUser>().cloned();
    let client_ip = client_ip(&req);
    let params = req.uri().query().map(|q| q.to_string());
    let started = Instant::now();

    let response = next.run(req).await;

    let entry = OperationEntry {
        telephone: user.as_ref().map(|u| u.telephone.clone()),
        user_id: user.as_ref().map(|u| u.id),
        user_name: user.map(|u| u.name),
        status_code: Some(response.status().as_u16() as i64),
        client_ip,
        request_method: Some(method.to_string()),
        api_path: Some(path),
        summary: None,
        operation_content: None,
        process_time: Some(started.elapsed().as_secs_f64() * 1000.0),
        params,
    };
    state.oplog.log(entry);

    response
}

fn client_ip(req: &Request) -> Option<String> {
    for header in ["x-forwarded-for", "x-real-ip"] {
        if let Some(value) = req.headers().get(header)
            && let Ok(text) = value.to_str()
        {
            // 多级代理取第一个地址
            let first = text.split(',').next().unwrap_or(text).trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }
    None
}
