//! Menu Model (navigation tree)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Navigation menu node
///
/// Self-referential via `parent_id`; the full set of live rows forms a
/// forest. `perms` carries the permission string gating one route/action
/// (e.g. `"product.dish.list"`), inherited by users through roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: i64,
    pub title: String,
    pub icon: Option<String>,
    pub component: Option<String>,
    pub path: Option<String>,
    pub redirect: Option<String>,
    /// 0 directory / 1 page / 2 button
    pub menu_type: i64,
    pub perms: Option<String>,
    pub sort: i64,
    pub disabled: bool,
    /// Hidden menus are excluded from permission export
    pub hidden: bool,
    pub parent_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Create menu payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 50, message = "title must be 1-50 characters"))]
    pub title: String,
    pub icon: Option<String>,
    pub component: Option<String>,
    pub path: Option<String>,
    pub redirect: Option<String>,
    #[serde(default)]
    pub menu_type: i64,
    pub perms: Option<String>,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub hidden: bool,
    pub parent_id: Option<i64>,
}

/// Update menu payload (partial)
///
/// `parent_id` uses a double Option: absent = unchanged, `null` = move to
/// root, value = re-parent (cycle-checked).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuUpdate {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub component: Option<String>,
    pub path: Option<String>,
    pub redirect: Option<String>,
    pub menu_type: Option<i64>,
    pub perms: Option<String>,
    pub sort: Option<i64>,
    pub disabled: Option<bool>,
    pub hidden: Option<bool>,
    #[serde(default, with = "crate::models::dept::double_option")]
    pub parent_id: Option<Option<i64>>,
}
