//! Record Models (operation audit and SMS send log)

use serde::{Deserialize, Serialize};

/// One audited API operation
///
/// Written asynchronously by the operation-log worker; login attempts are
/// recorded through the same table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OperationRecord {
    pub id: i64,
    pub telephone: Option<String>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub status_code: Option<i64>,
    pub client_ip: Option<String>,
    pub request_method: Option<String>,
    pub api_path: Option<String>,
    pub summary: Option<String>,
    pub operation_content: Option<String>,
    /// Request handling time in milliseconds
    pub process_time: Option<f64>,
    /// Request parameters (JSON string)
    pub params: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// One sent SMS message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SmsRecord {
    pub id: i64,
    pub telephone: String,
    pub content: String,
    /// Whether the gateway accepted the message
    pub status: bool,
    /// e.g. `"login_code"`, `"init_password"`
    pub scene: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}
