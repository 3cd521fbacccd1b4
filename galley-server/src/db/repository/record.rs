//! Record Repository (operation audit and SMS send log)

use super::RepoResult;
use crate::db::dao::{Arg, Dao, Entity, QuerySpec};
use shared::models::{OperationRecord, SmsRecord};
use sqlx::SqlitePool;

impl Entity for OperationRecord {
    const TABLE: &'static str = "operation_record";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "telephone",
        "user_id",
        "user_name",
        "status_code",
        "client_ip",
        "request_method",
        "api_path",
        "summary",
        "operation_content",
        "process_time",
        "params",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["telephone", "user_name", "api_path"];
}

impl Entity for SmsRecord {
    const TABLE: &'static str = "sms_record";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "telephone",
        "content",
        "status",
        "scene",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["telephone"];
}

/// Fields of one operation entry, as captured by the middleware
#[derive(Debug, Clone, Default)]
pub struct OperationEntry {
    pub telephone: Option<String>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub status_code: Option<i64>,
    pub client_ip: Option<String>,
    pub request_method: Option<String>,
    pub api_path: Option<String>,
    pub summary: Option<String>,
    pub operation_content: Option<String>,
    pub process_time: Option<f64>,
    pub params: Option<String>,
}

pub async fn insert_operation(pool: &SqlitePool, entry: OperationEntry) -> RepoResult<()> {
    Dao::<OperationRecord>::new(pool)
        .insert(vec![
            ("telephone", entry.telephone.into()),
            ("user_id", entry.user_id.into()),
            ("user_name", entry.user_name.into()),
            ("status_code", entry.status_code.into()),
            ("client_ip", entry.client_ip.into()),
            ("request_method", entry.request_method.into()),
            ("api_path", entry.api_path.into()),
            ("summary", entry.summary.into()),
            ("operation_content", entry.operation_content.into()),
            ("process_time", entry.process_time.into()),
            ("params", entry.params.into()),
        ])
        .await?;
    Ok(())
}

pub async fn list_operations(
    pool: &SqlitePool,
    spec: &QuerySpec,
) -> RepoResult<(Vec<OperationRecord>, i64)> {
    Dao::<OperationRecord>::new(pool).list(spec).await
}

pub async fn insert_sms(
    pool: &SqlitePool,
    telephone: &str,
    content: &str,
    status: bool,
    scene: &str,
) -> RepoResult<()> {
    Dao::<SmsRecord>::new(pool)
        .insert(vec![
            ("telephone", Arg::Text(telephone.to_string())),
            ("content", Arg::Text(content.to_string())),
            ("status", status.into()),
            ("scene", Arg::Text(scene.to_string())),
        ])
        .await?;
    Ok(())
}

pub async fn list_sms(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<SmsRecord>, i64)> {
    Dao::<SmsRecord>::new(pool).list(spec).await
}
