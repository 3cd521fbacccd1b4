//! System Settings Repository

use super::{RepoError, RepoResult};
use crate::db::dao::{Dao, Entity, QuerySpec};
use shared::models::{SettingEntry, SettingTab};
use shared::util::now_millis;
use sqlx::SqlitePool;
use std::collections::HashMap;

impl Entity for SettingTab {
    const TABLE: &'static str = "setting_tab";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "classify",
        "tab_name",
        "hidden",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const UNIQUE: &'static [&'static str] = &["tab_name"];
    const DEFAULT_ORDER: &'static str = "id ASC";
}

impl Entity for SettingEntry {
    const TABLE: &'static str = "setting_entry";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "label",
        "key",
        "value",
        "remark",
        "disabled",
        "tab_id",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const UNIQUE: &'static [&'static str] = &["key"];
    const DEFAULT_ORDER: &'static str = "id ASC";
}

/// Tabs under the given classify groups
pub async fn tabs_by_classify(
    pool: &SqlitePool,
    classifys: &[String],
) -> RepoResult<Vec<SettingTab>> {
    let spec = QuerySpec::new().in_list(
        "classify",
        classifys.iter().map(|c| c.clone().into()).collect(),
    );
    let (tabs, _) = Dao::<SettingTab>::new(pool).list(&spec).await?;
    Ok(tabs)
}

/// All live entries under one tab
pub async fn entries_by_tab(pool: &SqlitePool, tab_id: i64) -> RepoResult<Vec<SettingEntry>> {
    let spec = QuerySpec::new().eq("tab_id", tab_id);
    let (entries, _) = Dao::<SettingEntry>::new(pool).list(&spec).await?;
    Ok(entries)
}

pub async fn get_by_key(pool: &SqlitePool, key: &str) -> RepoResult<SettingEntry> {
    Dao::<SettingEntry>::new(pool)
        .get_by("key", key)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("setting {key} not found")))
}

/// Bulk value update keyed by configuration key
///
/// Every key must resolve to a live entry; an unknown key fails the whole
/// batch before any write happens.
pub async fn update_values(
    pool: &SqlitePool,
    values: &HashMap<String, Option<String>>,
) -> RepoResult<u64> {
    for key in values.keys() {
        get_by_key(pool, key).await?;
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;
    let mut updated = 0u64;
    for (key, value) in values {
        let result =
            sqlx::query("UPDATE setting_entry SET value = ?, updated_at = ? WHERE key = ? AND is_deleted = 0")
                .bind(value.as_deref())
                .bind(now)
                .bind(key.as_str())
                .execute(&mut *tx)
                .await?;
        updated += result.rows_affected();
    }
    tx.commit().await?;
    Ok(updated)
}

/// Key/value map of the base web configuration, read on every console load
pub async fn base_config(pool: &SqlitePool) -> RepoResult<HashMap<String, Option<String>>> {
    let tabs = tabs_by_classify(pool, &["web".to_string()]).await?;
    let mut config = HashMap::new();
    for tab in tabs.into_iter().filter(|t| !t.hidden) {
        for entry in entries_by_tab(pool, tab.id).await? {
            if !entry.disabled {
                config.insert(entry.key, entry.value);
            }
        }
    }
    Ok(config)
}
