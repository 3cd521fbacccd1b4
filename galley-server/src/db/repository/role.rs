//! Role Repository
//!
//! Role id 1 is the protected superuser role; it bypasses permission
//! resolution and refuses update/delete.

use super::{RepoError, RepoResult};
use crate::db::dao::{Arg, Dao, Entity, QuerySpec, RefCheck};
use serde::Serialize;
use shared::ErrorCode;
use shared::models::{Role, RoleCreate, RoleOut, RoleUpdate};
use sqlx::SqlitePool;

/// Fixed id of the protected superuser role
pub const SUPERUSER_ROLE_ID: i64 = 1;

impl Entity for Role {
    const TABLE: &'static str = "role";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "role_key",
        "sort",
        "disabled",
        "remark",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name", "role_key"];
    const UNIQUE: &'static [&'static str] = &["name", "role_key"];
    const DEFAULT_ORDER: &'static str = "sort ASC, id DESC";
    const RESTRICT_REFS: &'static [RefCheck] = &[RefCheck {
        table: "user_role",
        column: "role_id",
        live_only: false,
    }];
}

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<Role>, i64)> {
    Dao::<Role>::new(pool).list(spec).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<RoleOut> {
    let role = Dao::<Role>::new(pool).get(id).await?;
    let menu_ids = menu_ids(pool, id).await?;
    let dept_ids = dept_ids(pool, id).await?;
    Ok(RoleOut {
        role,
        menu_ids,
        dept_ids,
    })
}

pub async fn create(pool: &SqlitePool, data: RoleCreate) -> RepoResult<Role> {
    let role = Dao::<Role>::new(pool)
        .insert(vec![
            ("name", data.name.into()),
            ("role_key", data.role_key.into()),
            ("sort", data.sort.into()),
            ("disabled", data.disabled.into()),
            ("remark", data.remark.into()),
        ])
        .await?;

    replace_links(pool, role.id, Some(&data.menu_ids), Some(&data.dept_ids)).await?;
    Ok(role)
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoleUpdate) -> RepoResult<Role> {
    if id == SUPERUSER_ROLE_ID {
        return Err(RepoError::Business(
            ErrorCode::SuperuserProtected,
            "Cannot modify the superuser role".into(),
        ));
    }

    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.role_key {
        columns.push(("role_key", v.into()));
    }
    if let Some(v) = data.sort {
        columns.push(("sort", v.into()));
    }
    if let Some(v) = data.disabled {
        columns.push(("disabled", v.into()));
    }
    if let Some(v) = data.remark {
        columns.push(("remark", v.into()));
    }

    let role = Dao::<Role>::new(pool).update(id, columns).await?;
    replace_links(pool, id, data.menu_ids.as_deref(), data.dept_ids.as_deref()).await?;
    Ok(role)
}

/// Hard delete roles
///
/// Blocked while any user still holds one of the roles; the role's own menu
/// and department links are cascaded.
pub async fn delete(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.contains(&SUPERUSER_ROLE_ID) {
        return Err(RepoError::Business(
            ErrorCode::SuperuserProtected,
            "Cannot delete the superuser role".into(),
        ));
    }

    // The user_role restriction is checked by the DAO before any row dies
    let affected = Dao::<Role>::new(pool).delete(ids, false, vec![]).await?;

    if affected > 0 {
        let marks = vec!["?"; ids.len()].join(", ");
        for table in ["role_menu", "role_dept"] {
            let sql = format!("DELETE FROM {table} WHERE role_id IN ({marks})");
            let mut query = sqlx::query(&sql);
            for id in ids {
                query = query.bind(*id);
            }
            query.execute(pool).await?;
        }
    }
    Ok(affected)
}

/// Option item for role selectors
#[derive(Debug, Clone, Serialize)]
pub struct RoleOption {
    pub id: i64,
    pub name: String,
}

pub async fn options(pool: &SqlitePool) -> RepoResult<Vec<RoleOption>> {
    let spec = QuerySpec::new().eq("disabled", false);
    let (roles, _) = Dao::<Role>::new(pool).list(&spec).await?;
    Ok(roles
        .into_iter()
        .map(|r| RoleOption {
            id: r.id,
            name: r.name,
        })
        .collect())
}

pub async fn menu_ids(pool: &SqlitePool, role_id: i64) -> RepoResult<Vec<i64>> {
    Ok(
        sqlx::query_scalar("SELECT menu_id FROM role_menu WHERE role_id = ?")
            .bind(role_id)
            .fetch_all(pool)
            .await?,
    )
}

pub async fn dept_ids(pool: &SqlitePool, role_id: i64) -> RepoResult<Vec<i64>> {
    Ok(
        sqlx::query_scalar("SELECT dept_id FROM role_dept WHERE role_id = ?")
            .bind(role_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Replace the role's association rows; `None` leaves a link set untouched
async fn replace_links(
    pool: &SqlitePool,
    role_id: i64,
    menu_ids: Option<&[i64]>,
    dept_ids: Option<&[i64]>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    if let Some(ids) = menu_ids {
        sqlx::query("DELETE FROM role_menu WHERE role_id = ?")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;
        for &menu_id in ids {
            sqlx::query("INSERT OR IGNORE INTO role_menu (role_id, menu_id) VALUES (?, ?)")
                .bind(role_id)
                .bind(menu_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    if let Some(ids) = dept_ids {
        sqlx::query("DELETE FROM role_dept WHERE role_id = ?")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;
        for &dept_id in ids {
            sqlx::query("INSERT OR IGNORE INTO role_dept (role_id, dept_id) VALUES (?, ?)")
                .bind(role_id)
                .bind(dept_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}
