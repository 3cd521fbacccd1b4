//! Combo Models (套餐)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Combo series (套餐系列)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ComboSeries {
    pub id: i64,
    pub name: String,
    pub sort: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Set-menu combo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Combo {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub series_id: i64,
    pub person_count: i64,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
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

/// Combo read shape with series name and ordered image urls attached
#[derive(Debug, Clone, Serialize)]
pub struct ComboOut {
    #[serde(flatten)]
    pub combo: Combo,
    pub series_name: Option<String>,
    pub images: Vec<String>,
}

/// One group slot inside a combo (套餐详情)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ComboItem {
    pub id: i64,
    pub combo_id: i64,
    pub group_id: i64,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub choose_count: i64,
    pub sort: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ComboSeriesCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComboSeriesUpdate {
    pub name: Option<String>,
    pub sort: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ComboCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub series_id: i64,
    #[serde(default = "default_person_count")]
    pub person_count: i64,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    pub time_on: Option<i64>,
    pub time_off: Option<i64>,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub status: i64,
    pub description: Option<String>,
    pub english_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComboUpdate {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub series_id: Option<i64>,
    pub person_count: Option<i64>,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    pub time_on: Option<i64>,
    pub time_off: Option<i64>,
    pub sort: Option<i64>,
    pub status: Option<i64>,
    pub description: Option<String>,
    pub english_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComboItemCreate {
    pub combo_id: i64,
    pub group_id: i64,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub choose_count: i64,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComboItemUpdate {
    pub group_id: Option<i64>,
    pub display_name: Option<String>,
    pub english_name: Option<String>,
    pub choose_count: Option<i64>,
    pub sort: Option<i64>,
}

fn default_person_count() -> i64 {
    1
}

fn default_true() -> bool {
    true
}
