//! Permission Resolver
//!
//! Permission strings live on menu records and reach users through their
//! roles (`user_role` → `role_menu` → `menu.perms`). The set is recomputed
//! on every request inside the auth middleware; nothing is cached, so the
//! association tables are authoritative at read time.

use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::auth::CurrentUser;
use crate::db::repository::role::SUPERUSER_ROLE_ID;
use crate::db::repository::user::SUPERUSER_ID;
use shared::error::{AppError, AppResult};

/// The resolved permission set of one request
///
/// The superuser set is the single wildcard entry `"*"`.
#[derive(Debug, Clone)]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    pub const WILDCARD: &'static str = "*";

    pub fn new(perms: HashSet<String>) -> Self {
        Self(perms)
    }

    pub fn superuser() -> Self {
        Self([Self::WILDCARD.to_string()].into_iter().collect())
    }

    pub fn allows(&self, permission: &str) -> bool {
        self.0.contains(Self::WILDCARD) || self.0.contains(permission)
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        let mut perms: Vec<String> = self.0.into_iter().collect();
        perms.sort();
        perms
    }
}

/// Union the permission strings of the menus reachable from a role set
///
/// Menus that are disabled or hidden from permission export contribute
/// nothing; so do empty permission strings.
pub fn union_menu_perms<I>(perms: I) -> HashSet<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    perms
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect()
}

/// Resolve the permission set for a user
///
/// User id 1 and holders of role id 1 short-circuit to the universal set
/// without touching the role/menu tables.
pub async fn resolve(pool: &SqlitePool, user: &CurrentUser) -> AppResult<PermissionSet> {
    if user.is_superuser || user.id == SUPERUSER_ID {
        return Ok(PermissionSet::superuser());
    }

    let role_ids: Vec<i64> = sqlx::query_scalar("SELECT role_id FROM user_role WHERE user_id = ?")
        .bind(user.id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    if role_ids.contains(&SUPERUSER_ROLE_ID) {
        return Ok(PermissionSet::superuser());
    }
    if role_ids.is_empty() {
        return Ok(PermissionSet::new(HashSet::new()));
    }

    let marks = vec!["?"; role_ids.len()].join(", ");
    let sql = format!(
        "SELECT DISTINCT m.perms FROM menu m \
         JOIN role_menu rm ON rm.menu_id = m.id \
         JOIN role r ON r.id = rm.role_id \
         WHERE rm.role_id IN ({marks}) \
         AND m.is_deleted = 0 AND m.disabled = 0 AND m.hidden = 0 \
         AND r.is_deleted = 0 AND r.disabled = 0",
    );
    let mut query = sqlx::query_scalar::<_, Option<String>>(&sql);
    for role_id in &role_ids {
        query = query.bind(*role_id);
    }
    let perms = query
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(PermissionSet::new(union_menu_perms(perms)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_skips_empty_and_none() {
        let set = union_menu_perms(vec![
            Some("auth.user.list".to_string()),
            Some("auth.user.list".to_string()),
            Some(String::new()),
            None,
            Some("product.dish.create".to_string()),
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("auth.user.list"));
        assert!(set.contains("product.dish.create"));
    }

    #[test]
    fn test_wildcard_allows_everything() {
        let set = PermissionSet::superuser();
        assert!(set.allows("auth.user.list"));
        assert!(set.allows("anything.at.all"));
    }

    #[test]
    fn test_plain_set_is_exact() {
        let set = PermissionSet::new(["auth.user.list".to_string()].into_iter().collect());
        assert!(set.allows("auth.user.list"));
        assert!(!set.allows("auth.user.create"));
    }
}
