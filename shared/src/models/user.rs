//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Back-office user (手机号登录)
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    /// Unique login identifier
    pub telephone: String,
    pub name: String,
    pub nickname: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 0 male / 1 female / 2 unknown
    pub gender: i64,
    pub is_active: bool,
    pub is_staff: bool,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// User read shape with association id sets attached
#[derive(Debug, Clone, Serialize)]
pub struct UserOut {
    #[serde(flatten)]
    pub user: User,
    pub role_ids: Vec<i64>,
    pub dept_ids: Vec<i64>,
}

/// Create user payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 5, max = 20, message = "telephone must be 5-20 characters"))]
    pub telephone: String,
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    pub nickname: Option<String>,
    /// Plain password; hashed before storage. Defaults to the configured
    /// initial password when absent.
    pub password: Option<String>,
    #[serde(default = "default_gender")]
    pub gender: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_staff: bool,
    #[serde(default)]
    pub role_ids: Vec<i64>,
    #[serde(default)]
    pub dept_ids: Vec<i64>,
}

/// Update user payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub telephone: Option<String>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub gender: Option<i64>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub role_ids: Option<Vec<i64>>,
    pub dept_ids: Option<Vec<i64>>,
}

fn default_gender() -> i64 {
    2
}

fn default_true() -> bool {
    true
}
