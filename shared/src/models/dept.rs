//! Department Model (organizational tree)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Department node, self-referential via `parent_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dept {
    pub id: i64,
    pub name: String,
    pub dept_key: String,
    pub sort: i64,
    pub disabled: bool,
    pub owner: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub parent_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
}

/// Create department payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeptCreate {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "dept_key must be 1-50 characters"))]
    pub dept_key: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub disabled: bool,
    pub owner: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub parent_id: Option<i64>,
}

/// Update department payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeptUpdate {
    pub name: Option<String>,
    pub dept_key: Option<String>,
    pub sort: Option<i64>,
    pub disabled: Option<bool>,
    pub owner: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default, with = "double_option")]
    pub parent_id: Option<Option<i64>>,
}

/// Serde helper distinguishing "field absent" from "field null".
///
/// Wrapping the inner value lets partial updates express "move to root"
/// (`"parent_id": null`) separately from "leave unchanged" (absent).
pub mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }

    #[allow(dead_code)]
    pub fn serialize<S, T>(value: &Option<Option<T>>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(ser),
            None => ser.serialize_none(),
        }
    }
}
