//! Role Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role entity (RBAC 角色)
///
/// Role id 1 is the protected superuser role: it bypasses permission
/// resolution entirely and can neither be updated nor deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub role_key: String,
    pub sort: i64,
    pub disabled: bool,
    pub remark: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Role read shape with association id sets attached
#[derive(Debug, Clone, Serialize)]
pub struct RoleOut {
    #[serde(flatten)]
    pub role: Role,
    pub menu_ids: Vec<i64>,
    pub dept_ids: Vec<i64>,
}

/// Create role payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoleCreate {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "role_key must be 1-50 characters"))]
    pub role_key: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub disabled: bool,
    pub remark: Option<String>,
    #[serde(default)]
    pub menu_ids: Vec<i64>,
    #[serde(default)]
    pub dept_ids: Vec<i64>,
}

/// Update role payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub role_key: Option<String>,
    pub sort: Option<i64>,
    pub disabled: Option<bool>,
    pub remark: Option<String>,
    pub menu_ids: Option<Vec<i64>>,
    pub dept_ids: Option<Vec<i64>>,
}
