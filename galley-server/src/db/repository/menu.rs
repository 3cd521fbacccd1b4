//! Menu Repository

use super::{RepoError, RepoResult};
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use crate::db::tree::{self, TreeRow};
use shared::models::{Menu, MenuCreate, MenuUpdate};
use sqlx::SqlitePool;

impl Entity for Menu {
    const TABLE: &'static str = "menu";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "icon",
        "component",
        "path",
        "redirect",
        "menu_type",
        "perms",
        "sort",
        "disabled",
        "hidden",
        "parent_id",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["title"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id ASC";
    const RESTRICT_REFS: &'static [RefCheck] = &[RefCheck {
        table: "role_menu",
        column: "menu_id",
        live_only: false,
    }];
}

impl TreeRow for Menu {
    fn id(&self) -> i64 {
        self.id
    }
    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
    fn sort(&self) -> i64 {
        self.sort
    }
    fn label(&self) -> &str {
        &self.title
    }
}

/// All live menu rows, the tree builder's input
pub async fn all_live(pool: &SqlitePool) -> RepoResult<Vec<Menu>> {
    let (rows, _) = Dao::<Menu>::new(pool).list(&QuerySpec::new()).await?;
    Ok(rows)
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Menu> {
    Dao::<Menu>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: MenuCreate) -> RepoResult<Menu> {
    if let Some(parent) = data.parent_id {
        // The parent must be a live menu
        Dao::<Menu>::new(pool).get(parent).await?;
    }
    Dao::<Menu>::new(pool)
        .insert(vec![
            ("title", data.title.into()),
            ("icon", data.icon.into()),
            ("component", data.component.into()),
            ("path", data.path.into()),
            ("redirect", data.redirect.into()),
            ("menu_type", data.menu_type.into()),
            ("perms", data.perms.into()),
            ("sort", data.sort.into()),
            ("disabled", data.disabled.into()),
            ("hidden", data.hidden.into()),
            ("parent_id", data.parent_id.into()),
        ])
        .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuUpdate) -> RepoResult<Menu> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.title {
        columns.push(("title", v.into()));
    }
    if let Some(v) = data.icon {
        columns.push(("icon", v.into()));
    }
    if let Some(v) = data.component {
        columns.push(("component", v.into()));
    }
    if let Some(v) = data.path {
        columns.push(("path", v.into()));
    }
    if let Some(v) = data.redirect {
        columns.push(("redirect", v.into()));
    }
    if let Some(v) = data.menu_type {
        columns.push(("menu_type", v.into()));
    }
    if let Some(v) = data.perms {
        columns.push(("perms", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.disabled {
        columns.push(("disabled", v.into()));
    }
    if let Some(v) = data.hidden {
        columns.push(("hidden", v.into()));
    }

    if let Some(new_parent) = data.parent_id {
        // Re-parenting is cycle-checked against the live forest
        let rows = all_live(pool).await?;
        tree::check_no_cycle(&rows, id, new_parent)?;
        if let Some(parent) = new_parent {
            Dao::<Menu>::new(pool).get(parent).await?;
        }
        columns.push(("parent_id", new_parent.into()));
    }

    Dao::<Menu>::new(pool).update(id, columns).await
}

/// Hard delete menus
///
/// Refused while a role association or a child menu exists: the forest
/// invariant does not allow orphaned subtrees.
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let marks = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT COUNT(*) FROM menu WHERE parent_id IN ({marks}) AND is_deleted = 0 \
         AND id NOT IN ({marks})"
    );
    let mut query = sqlx::query_scalar(&sql);
    for id in ids.iter().chain(ids.iter()) {
        query = query.bind(*id);
    }
    let children: i64 = query.fetch_one(pool).await?;
    if children > 0 {
        return Err(RepoError::Referenced(
            "menu still has child menus".to_string(),
        ));
    }

    Dao::<Menu>::new(pool).delete(ids, false, vec![]).await
}
