//! System Settings Models

use serde::{Deserialize, Serialize};

/// Settings tab (配置标签页)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SettingTab {
    pub id: i64,
    pub title: String,
    /// Grouping key, e.g. `"web"`, `"system"`
    pub classify: String,
    pub tab_name: String,
    pub hidden: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// One configuration entry under a tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SettingEntry {
    pub id: i64,
    pub label: String,
    /// Unique configuration key, e.g. `"web_title"`
    pub key: String,
    pub value: Option<String>,
    pub remark: Option<String>,
    pub disabled: bool,
    pub tab_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}
