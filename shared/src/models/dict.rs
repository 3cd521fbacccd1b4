//! Dictionary Models (lookup tables)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dictionary type (字典类型)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DictType {
    pub id: i64,
    pub name: String,
    /// Unique lookup key, e.g. `"sys_gender"`
    pub dict_type: String,
    pub disabled: bool,
    pub remark: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Dictionary element under a type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DictDetail {
    pub id: i64,
    pub label: String,
    pub value: String,
    pub sort: i64,
    pub disabled: bool,
    pub is_default: bool,
    pub dict_type_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DictTypeCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub dict_type: String,
    #[serde(default)]
    pub disabled: bool,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictTypeUpdate {
    pub name: Option<String>,
    pub dict_type: Option<String>,
    pub disabled: Option<bool>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DictDetailCreate {
    #[validate(length(min = 1, max = 50))]
    pub label: String,
    #[validate(length(min = 1, max = 50))]
    pub value: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub is_default: bool,
    pub dict_type_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictDetailUpdate {
    pub label: Option<String>,
    pub value: Option<String>,
    pub sort: Option<i64>,
    pub disabled: Option<bool>,
    pub is_default: Option<bool>,
    pub dict_type_id: Option<i64>,
}
