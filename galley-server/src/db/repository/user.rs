//! User Repository

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::dao::{Arg, Dao, Entity, ImportColumn, QuerySpec};
use shared::ErrorCode;
use shared::models::{User, UserCreate, UserOut, UserUpdate};
use shared::util::now_millis;

/// Fixed id of the seeded superuser account
pub const SUPERUSER_ID: i64 = 1;

/// Header schema for bulk user import/export
pub const IMPORT_HEADERS: &[ImportColumn] = &[
    ImportColumn {
        label: "手机号",
        field: "telephone",
        required: true,
    },
    ImportColumn {
        label: "姓名",
        field: "name",
        required: true,
    },
    ImportColumn {
        label: "昵称",
        field: "nickname",
        required: false,
    },
    ImportColumn {
        label: "性别",
        field: "gender",
        required: false,
    },
];

impl Entity for User {
    const TABLE: &'static str = "user";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "telephone",
        "name",
        "nickname",
        "password_hash",
        "gender",
        "is_active",
        "is_staff",
        "last_login_at",
        "created_at",
        "updated_at",
        "deleted_at",
        "is_deleted",
    ];
    const FUZZY: &'static [&'static str] = &["name", "nickname", "telephone"];
    const UNIQUE: &'static [&'static str] = &["telephone"];
}

/// Hash a plain password with Argon2id
pub fn hash_password(plain: &str) -> RepoResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))
}

/// Verify a plain password against the stored hash
pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub async fn list(pool: &SqlitePool, spec: &QuerySpec) -> RepoResult<(Vec<UserOut>, i64)> {
    let (users, total) = Dao::<User>::new(pool).list(spec).await?;
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let role_ids = role_ids(pool, user.id).await?;
        let dept_ids = dept_ids(pool, user.id).await?;
        out.push(UserOut {
            user,
            role_ids,
            dept_ids,
        });
    }
    Ok((out, total))
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<UserOut> {
    let user = Dao::<User>::new(pool).get(id).await?;
    let role_ids = role_ids(pool, id).await?;
    let dept_ids = dept_ids(pool, id).await?;
    Ok(UserOut {
        user,
        role_ids,
        dept_ids,
    })
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> RepoResult<User> {
    Dao::<User>::new(pool).get(id).await
}

/// Unique-field lookup used by login and SMS endpoints
pub async fn get_by_telephone(pool: &SqlitePool, telephone: &str) -> RepoResult<Option<User>> {
    Dao::<User>::new(pool).get_by("telephone", telephone).await
}

pub async fn create(pool: &SqlitePool, data: UserCreate, default_password: &str) -> RepoResult<User> {
    let plain = data.password.as_deref().unwrap_or(default_password);
    let password_hash = hash_password(plain)?;

    let user = Dao::<User>::new(pool)
        .insert(vec![
            ("telephone", data.telephone.into()),
            ("name", data.name.into()),
            ("nickname", data.nickname.into()),
            ("password_hash", password_hash.into()),
            ("gender", data.gender.into()),
            ("is_active", data.is_active.into()),
            ("is_staff", data.is_staff.into()),
        ])
        .await?;

    replace_links(pool, user.id, Some(&data.role_ids), Some(&data.dept_ids)).await?;
    Ok(user)
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let mut columns: Vec<(&'static str, Arg)> = Vec::new();
    if let Some(v) = data.telephone {
        columns.push(("telephone", v.into()));
    }
    if let Some(v) = data.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = data.nickname {
        columns.push(("nickname", v.into()));
    }
    if let Some(v) = data.gender {
        columns.push(("gender", v.into()));
    }
    if let Some(v) = data.is_active {
        columns.push(("is_active", v.into()));
    }
    if let Some(v) = data.is_staff {
        columns.push(("is_staff", v.into()));
    }

    let user = Dao::<User>::new(pool).update(id, columns).await?;
    replace_links(pool, id, data.role_ids.as_deref(), data.dept_ids.as_deref()).await?;
    Ok(user)
}

/// Batch soft delete
///
/// The rows stay addressable for audit; `is_active` drops with them and
/// their role links are cleared so a later restore starts unprivileged.
pub async fn delete(pool: &SqlitePool, ids: &[i64], operator_id: i64) -> RepoResult<u64> {
    if ids.contains(&operator_id) {
        return Err(RepoError::Business(
            ErrorCode::CannotDeleteSelf,
            "Cannot delete the currently logged-in user".into(),
        ));
    }
    if ids.contains(&SUPERUSER_ID) {
        return Err(RepoError::Business(
            ErrorCode::SuperuserProtected,
            "Cannot delete the superuser account".into(),
        ));
    }

    let affected = Dao::<User>::new(pool)
        .delete(ids, true, vec![("is_active", Arg::Bool(false))])
        .await?;

    if affected > 0 {
        let marks = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM user_role WHERE user_id IN ({marks})");
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        query.execute(pool).await?;
    }
    Ok(affected)
}

pub async fn set_password(pool: &SqlitePool, id: i64, plain: &str) -> RepoResult<()> {
    let password_hash = hash_password(plain)?;
    Dao::<User>::new(pool)
        .update(id, vec![("password_hash", password_hash.into())])
        .await?;
    Ok(())
}

pub async fn touch_last_login(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE user SET last_login_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn role_ids(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<i64>> {
    Ok(
        sqlx::query_scalar("SELECT role_id FROM user_role WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?,
    )
}

pub async fn dept_ids(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<i64>> {
    Ok(
        sqlx::query_scalar("SELECT dept_id FROM user_dept WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Replace the user's association rows; `None` leaves a link set untouched
async fn replace_links(
    pool: &SqlitePool,
    user_id: i64,
    role_ids: Option<&[i64]>,
    dept_ids: Option<&[i64]>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    if let Some(ids) = role_ids {
        sqlx::query("DELETE FROM user_role WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        for &role_id in ids {
            sqlx::query("INSERT OR IGNORE INTO user_role (user_id, role_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(role_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    if let Some(ids) = dept_ids {
        sqlx::query("DELETE FROM user_dept WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        for &dept_id in ids {
            sqlx::query("INSERT OR IGNORE INTO user_dept (user_id, dept_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(dept_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Seed the superuser account when the user table is empty
pub async fn ensure_superuser(
    pool: &SqlitePool,
    telephone: &str,
    password: &str,
) -> RepoResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    let now = now_millis();
    sqlx::query(
        "INSERT INTO user (id, telephone, name, password_hash, gender, is_active, is_staff, \
         created_at, updated_at, is_deleted) VALUES (?, ?, ?, ?, 2, 1, 1, ?, ?, 0)",
    )
    .bind(SUPERUSER_ID)
    .bind(telephone)
    .bind("超级管理员")
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO user_role (user_id, role_id) VALUES (?, 1)")
        .bind(SUPERUSER_ID)
        .execute(pool)
        .await?;

    tracing::info!(telephone, "Seeded superuser account");
    Ok(())
}
