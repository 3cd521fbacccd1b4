//! Company and Branch Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Company (公司)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// 0 headquarters / 1 subsidiary
    pub busi_type: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Branch / store (店铺)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub web_site: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default = "default_busi_type")]
    pub busi_type: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub busi_type: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BranchCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub company_id: i64,
    pub web_site: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub company_id: Option<i64>,
    pub web_site: Option<String>,
    pub is_active: Option<bool>,
}

fn default_busi_type() -> i64 {
    1
}

fn default_true() -> bool {
    true
}
