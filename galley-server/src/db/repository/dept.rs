//! Department Repository

use super::{RepoError, RepoResult};
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use crate::db::tree::{self, TreeRow};
use shared::models::{Dept, DeptCreate, DeptUpdate};
use sqlx::SqlitePool;

impl Entity for Dept {
    const TABLE: &'static str = "dept";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "dept_key",
        "sort",
        "disabled",
        "owner",
        "phone",
        "email",
        "parent_id",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name", "dept_key"];
    const UNIQUE: &'static [&'static str] = &["dept_key"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id ASC";
    const RESTRICT_REFS: &'static [RefCheck] = &[
        RefCheck {
            table: "user_dept",
            column: "dept_id",
            live_only: false,
        },
        RefCheck {
            table: "role_dept",
            column: "dept_id",
            live_only: false,
        },
    ];
}

impl TreeRow for Dept {
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
        &self.name
    }
}

pub async fn all_live(pool: &SqlitePool) -> RepoResult<Vec<Dept>> {
    let (rows, _) = Dao::<Dept>::new(pool).list(&QuerySpec::new()).await?;
    Ok(rows)
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Dept> {
    Dao::<Dept>::new(pool).get(id).await
}

pub async fn create(pool: &SqlitePool, data: DeptCreate) -> RepoResult<Dept> {
    if let Some(parent) = data.parent_id {
        Dao::<Dept>::new(pool).get(parent).await?;
    }
    Dao::<Dept>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("dept_key", data.dept_key.into()),
            ("sort", data.sort.into()),
            ("disabled", data.disabled.into()),
            ("owner", data.owner.into()),
            ("phone", data.phone.into()),
            ("email", data.email.into()),
            ("parent_id", data.parent_id.into()),
        ])
        .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: DeptUpdate) -> RepoResult<Dept> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.dept_key {
        columns.push(("dept_key", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.disabled {
        columns.push(("disabled", v.into()));
    }
    if let Some(v) = data.owner {
        columns.push(("owner", v.into()));
    }
    if let Some(v) = data.phone {
        columns.push(("phone", v.into()));
    }
    if let Some(v) = data.email {
        columns.push(("email", v.into()));
    }

    if let Some(new_parent) = data.parent_id {
        let rows = all_live(pool).await?;
        tree::check_no_cycle(&rows, id, new_parent)?;
        if let Some(parent) = new_parent {
            Dao::<Dept>::new(pool).get(parent).await?;
        }
        columns.push(("parent_id", new_parent.into()));
    }

    Dao::<Dept>::new(pool).update(id, columns).await
}

/// Hard delete departments; refused while users/roles reference them or
/// child departments exist
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let marks = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT COUNT(*) FROM dept WHERE parent_id IN ({marks}) AND is_deleted = 0 \
         AND id NOT IN ({marks})"
    );
    let mut query = sqlx::query_scalar(&sql);
    for id in ids.iter().chain(ids.iter()) {
        query = query.bind(*id);
    }
    let children: i64 = query.fetch_one(pool).await?;
    if children > 0 {
        return Err(RepoError::Referenced(
            "department still has child departments".to_string(),
        ));
    }

    Dao::<Dept>::new(pool).delete(ids, false, vec![]).await
}
