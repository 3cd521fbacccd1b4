//! Dish Models (菜品)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dish lifecycle status
///
/// -1 new / 0 draft / 1 uploaded / 2 published / 3 out of stock / 9 taken down
pub mod dish_status {
    pub const NEW: i64 = -1;
    pub const DRAFT: i64 = 0;
    pub const UPLOADED: i64 = 1;
    pub const PUBLISHED: i64 = 2;
    pub const OUT_OF_STOCK: i64 = 3;
    pub const TAKEN_DOWN: i64 = 9;
}

/// Dish entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub kitchen_id: i64,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub time_on: Option<i64>,
    pub time_off: Option<i64>,
    pub sort: i64,
    pub status: i64,
    pub description: Option<String>,
    pub english_description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Dish read shape with kitchen name and ordered image urls attached
///
/// Assembled by an explicit read-side join/aggregation step in the
/// repository; the entity itself stays free of query concerns.
#[derive(Debug, Clone, Serialize)]
pub struct DishOut {
    #[serde(flatten)]
    pub dish: Dish,
    pub kitchen_name: Option<String>,
    pub images: Vec<String>,
}

/// Product image row, shared by dishes (`product_type = 1`) and combos
/// (`product_type = 2`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishImage {
    pub id: i64,
    pub product_type: i64,
    pub product_id: i64,
    pub platform: String,
    pub url: String,
    pub is_primary: bool,
    pub sort: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// BOM line (成本卡): material usage for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishBom {
    pub id: i64,
    pub product_type: i64,
    pub product_id: i64,
    /// 1 ingredient / 2 consumable
    pub material_type: i64,
    pub material_id: i64,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub quantity: i64,
    pub sort: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Per-branch dish override (菜品店铺)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishBranch {
    pub id: i64,
    pub dish_id: i64,
    pub branch_id: i64,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    pub sort: i64,
    pub status: i64,
    pub description: Option<String>,
    pub english_description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Branch override read shape with dish/branch names attached
#[derive(Debug, Clone, Serialize)]
pub struct DishBranchOut {
    #[serde(flatten)]
    pub dish_branch: DishBranch,
    pub dish_name: Option<String>,
    pub branch_name: Option<String>,
}

/// Create dish payload
///
/// `images` carries image operation directives, one `"url?op"` string per
/// entry (op: add / update / delete / original). The whole directive batch
/// is applied transactionally after the dish row is written.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DishCreate {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    pub kitchen_id: i64,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub time_on: Option<i64>,
    pub time_off: Option<i64>,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub status: i64,
    pub description: Option<String>,
    pub english_description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Update dish payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub kitchen_id: Option<i64>,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub time_on: Option<i64>,
    pub time_off: Option<i64>,
    pub sort: Option<i64>,
    pub status: Option<i64>,
    pub description: Option<String>,
    pub english_description: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DishImageCreate {
    #[serde(default = "default_product_type")]
    pub product_type: i64,
    pub product_id: i64,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[validate(length(min = 1, max = 255))]
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishImageUpdate {
    pub platform: Option<String>,
    pub url: Option<String>,
    pub is_primary: Option<bool>,
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DishBomCreate {
    #[serde(default = "default_product_type")]
    pub product_type: i64,
    pub product_id: i64,
    pub material_type: i64,
    pub material_id: i64,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishBomUpdate {
    pub material_type: Option<i64>,
    pub material_id: Option<i64>,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<i64>,
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DishBranchCreate {
    pub dish_id: i64,
    pub branch_id: i64,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub status: i64,
    pub description: Option<String>,
    pub english_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishBranchUpdate {
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    pub sort: Option<i64>,
    pub status: Option<i64>,
    pub description: Option<String>,
    pub english_description: Option<String>,
}

fn default_product_type() -> i64 {
    1
}

fn default_platform() -> String {
    "default".to_string()
}
