//! Kitchen Models (厨部)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kitchen section a dish is prepared in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Kitchen {
    pub id: i64,
    pub name: String,
    pub sort: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Kitchen ↔ branch assignment (厨部店铺)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct KitchenBranch {
    pub id: i64,
    pub branch_id: i64,
    pub kitchen_id: i64,
    pub sort: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KitchenCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitchenUpdate {
    pub name: Option<String>,
    pub sort: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KitchenBranchCreate {
    pub branch_id: i64,
    pub kitchen_id: i64,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitchenBranchUpdate {
    pub branch_id: Option<i64>,
    pub kitchen_id: Option<i64>,
    pub sort: Option<i64>,
}

fn default_true() -> bool {
    true
}
