//! Data-access semantics: soft delete, pagination, uniqueness, referential
//! conflicts and bulk import, exercised against an in-memory database.

use galley_server::db::DbService;
use galley_server::db::dao::{Dao, QuerySpec};
use galley_server::db::repository::{RepoError, dish, menu, role, tag, user};
use serde_json::{Map, Value, json};
use shared::models::{
    DictTypeCreate, KitchenCreate, MenuCreate, MenuUpdate, RoleCreate, TagCreate, UserCreate,
};
use sqlx::SqlitePool;

async fn pool() -> SqlitePool {
    DbService::new_in_memory()
        .await
        .expect("in-memory database")
        .pool
}

fn user_payload(telephone: &str) -> UserCreate {
    serde_json::from_value(json!({
        "telephone": telephone,
        "name": format!("user-{telephone}"),
    }))
    .unwrap()
}

#[tokio::test]
async fn soft_delete_hides_rows_but_keeps_them_addressable() {
    let pool = pool().await;
    let created = user::create(&pool, user_payload("13100000001"), "123456")
        .await
        .unwrap();

    let affected = user::delete(&pool, &[created.id], 999_999).await.unwrap();
    assert_eq!(affected, 1);

    // Gone from default reads
    assert!(matches!(
        user::get_user(&pool, created.id).await,
        Err(RepoError::NotFound(_))
    ));
    let (rows, total) = user::list(&pool, &QuerySpec::new()).await.unwrap();
    assert!(rows.iter().all(|u| u.user.id != created.id));
    assert_eq!(total, 0);

    // Still addressable with the explicit include-deleted flag
    let raw = Dao::<shared::models::User>::new(&pool)
        .get_with_deleted(created.id)
        .await
        .unwrap()
        .expect("soft-deleted row must remain addressable");
    assert!(raw.is_deleted);
    assert!(!raw.is_active);
    let first_deleted_at = raw.deleted_at.expect("deleted_at stamped");

    // Idempotent: a second soft delete touches nothing
    let affected = user::delete(&pool, &[created.id], 999_999).await.unwrap();
    assert_eq!(affected, 0);
    let raw = Dao::<shared::models::User>::new(&pool)
        .get_with_deleted(created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw.deleted_at, Some(first_deleted_at));
}

#[tokio::test]
async fn limit_zero_returns_all_and_windows_match() {
    let pool = pool().await;
    for i in 0..25 {
        tag::create(
            &pool,
            TagCreate {
                name: format!("tag-{i:02}"),
                sort: 0,
                is_active: true,
            },
        )
        .await
        .unwrap();
    }

    let (all, total) = tag::list(&pool, &QuerySpec::new()).await.unwrap();
    assert_eq!(all.len(), 25);
    assert_eq!(total, 25);

    // Pagination slices the exact same ordering
    let mut paged = Vec::new();
    for page in 0..3 {
        let spec = QuerySpec::new().paged(10, page * 10);
        let (rows, page_total) = tag::list(&pool, &spec).await.unwrap();
        assert_eq!(page_total, 25);
        paged.extend(rows);
    }
    assert_eq!(paged.len(), 25);
    let all_ids: Vec<i64> = all.iter().map(|t| t.id).collect();
    let paged_ids: Vec<i64> = paged.iter().map(|t| t.id).collect();
    assert_eq!(all_ids, paged_ids);
}

#[tokio::test]
async fn fuzzy_filter_ors_across_columns() {
    let pool = pool().await;
    for name in ["麻婆豆腐", "豆花", "烤鱼"] {
        tag::create(
            &pool,
            TagCreate {
                name: name.to_string(),
                sort: 0,
                is_active: true,
            },
        )
        .await
        .unwrap();
    }

    let spec = QuerySpec::new().fuzzy_opt(Some("豆".to_string()));
    let (rows, total) = tag::list(&pool, &spec).await.unwrap();
    assert_eq!(total, 2);
    assert!(rows.iter().all(|t| t.name.contains('豆')));
}

#[tokio::test]
async fn unique_check_rejects_duplicates_but_ignores_soft_deleted() {
    let pool = pool().await;

    let payload = TagCreate {
        name: "招牌".to_string(),
        sort: 0,
        is_active: true,
    };
    tag::create(&pool, payload.clone()).await.unwrap();
    assert!(matches!(
        tag::create(&pool, payload).await,
        Err(RepoError::Duplicate(_))
    ));

    // Soft-deleted rows do not block name reuse (dict types soft-delete)
    let dict = galley_server::db::repository::dict::create_type(
        &pool,
        DictTypeCreate {
            name: "支付方式".to_string(),
            dict_type: "pay_method".to_string(),
            disabled: false,
            remark: None,
        },
    )
    .await
    .unwrap();
    galley_server::db::repository::dict::delete_types(&pool, &[dict.id])
        .await
        .unwrap();

    galley_server::db::repository::dict::create_type(
        &pool,
        DictTypeCreate {
            name: "支付方式".to_string(),
            dict_type: "pay_method".to_string(),
            disabled: false,
            remark: None,
        },
    )
    .await
    .expect("soft-deleted key must be reusable");
}

#[tokio::test]
async fn role_delete_blocked_while_users_hold_it() {
    let pool = pool().await;

    let role = role::create(
        &pool,
        RoleCreate {
            name: "店长".to_string(),
            role_key: "store_manager".to_string(),
            sort: 0,
            disabled: false,
            remark: None,
            menu_ids: vec![],
            dept_ids: vec![],
        },
    )
    .await
    .unwrap();

    let mut payload = user_payload("13100000002");
    payload.role_ids = vec![role.id];
    let holder = user::create(&pool, payload, "123456").await.unwrap();

    assert!(matches!(
        role::delete(&pool, &[role.id]).await,
        Err(RepoError::Referenced(_))
    ));

    // Removing the user clears the association; the delete then succeeds
    user::delete(&pool, &[holder.id], 999_999).await.unwrap();
    let affected = role::delete(&pool, &[role.id]).await.unwrap();
    assert_eq!(affected, 1);
}

#[tokio::test]
async fn import_fails_fast_and_commits_nothing() {
    let pool = pool().await;
    galley_server::db::repository::kitchen::create(
        &pool,
        KitchenCreate {
            name: "热菜".to_string(),
            sort: 0,
            is_active: true,
        },
    )
    .await
    .unwrap();

    let mut rows: Vec<Map<String, Value>> = Vec::new();
    for i in 1..=10 {
        let mut row = Map::new();
        if i != 7 {
            row.insert("name".to_string(), json!(format!("dish-{i:02}")));
        }
        row.insert("kitchen_id".to_string(), json!(1));
        row.insert("status".to_string(), json!(0));
        rows.push(row);
    }

    let err = Dao::<shared::models::Dish>::new(&pool)
        .import(dish::IMPORT_HEADERS, &rows)
        .await
        .unwrap_err();
    match err {
        RepoError::ImportRow { row, label } => {
            assert_eq!(row, 7);
            assert_eq!(label, "名称");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Whole-batch transaction: rows 1-6 are not committed either
    let (_, total) = dish::list(&pool, &QuerySpec::new()).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn find_one_requires_an_identifying_filter() {
    let pool = pool().await;
    let err = Dao::<shared::models::Tag>::new(&pool)
        .find_one(&QuerySpec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Ambiguous(_)));
}

#[tokio::test]
async fn reparenting_into_own_subtree_is_rejected() {
    let pool = pool().await;

    let root = menu::create(
        &pool,
        MenuCreate {
            title: "报表".to_string(),
            icon: None,
            component: None,
            path: None,
            redirect: None,
            menu_type: 0,
            perms: None,
            sort: 0,
            disabled: false,
            hidden: false,
            parent_id: None,
        },
    )
    .await
    .unwrap();

    let child = menu::create(
        &pool,
        MenuCreate {
            title: "日报".to_string(),
            icon: None,
            component: None,
            path: None,
            redirect: None,
            menu_type: 1,
            perms: None,
            sort: 0,
            disabled: false,
            hidden: false,
            parent_id: Some(root.id),
        },
    )
    .await
    .unwrap();

    // Moving the root under its own child must fail
    let err = menu::update(
        &pool,
        root.id,
        MenuUpdate {
            parent_id: Some(Some(child.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(shared::ErrorCode::TreeCycle, _)
    ));

    // A node may not become its own parent either
    let err = menu::update(
        &pool,
        child.id,
        MenuUpdate {
            parent_id: Some(Some(child.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(shared::ErrorCode::TreeCycle, _)
    ));

    // Moving to the forest root stays legal
    menu::update(
        &pool,
        child.id,
        MenuUpdate {
            parent_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}
