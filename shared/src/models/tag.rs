//! Tag Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dish tag (标签)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub sort: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Dish ↔ tag assignment (菜品标签)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tagging {
    pub id: i64,
    pub dish_id: i64,
    pub tag_id: i64,
    pub sort: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagUpdate {
    pub name: Option<String>,
    pub sort: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaggingCreate {
    pub dish_id: i64,
    pub tag_id: i64,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaggingUpdate {
    pub dish_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub sort: Option<i64>,
}

fn default_true() -> bool {
    true
}
