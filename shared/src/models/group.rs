//! Dish Group Models (菜品组)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Group type (菜品组类型)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GroupType {
    pub id: i64,
    pub name: String,
    pub sort: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Dish group: a selectable/fixed set of dishes used by combos
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishGroup {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub group_type_id: i64,
    /// 0 optional / 1 required / 2 fixed
    pub stype: i64,
    pub branch_id: i64,
    pub sort: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// One dish inside a group (菜品组详情)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishGroupItem {
    pub id: i64,
    pub group_id: i64,
    pub dish_id: i64,
    pub additional_price: Option<f64>,
    pub sort: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GroupTypeCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupTypeUpdate {
    pub name: Option<String>,
    pub sort: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DishGroupCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub group_type_id: i64,
    #[serde(default)]
    pub stype: i64,
    pub branch_id: i64,
    #[serde(default)]
    pub sort: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishGroupUpdate {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub group_type_id: Option<i64>,
    pub stype: Option<i64>,
    pub branch_id: Option<i64>,
    pub sort: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DishGroupItemCreate {
    pub group_id: i64,
    pub dish_id: i64,
    pub additional_price: Option<f64>,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishGroupItemUpdate {
    pub dish_id: Option<i64>,
    pub additional_price: Option<f64>,
    pub sort: Option<i64>,
}

fn default_true() -> bool {
    true
}
