//! Product-catalog flows: image directives, read-side joins, kitchen
//! referential checks and permission resolution.

use galley_server::CurrentUser;
use galley_server::auth::resolver;
use galley_server::db::DbService;
use galley_server::db::repository::{RepoError, dish, kitchen, menu, role, setting, user};
use serde_json::json;
use shared::ErrorCode;
use shared::models::{DishCreate, DishUpdate, KitchenCreate, MenuCreate, RoleCreate, UserCreate};
use sqlx::SqlitePool;
use std::collections::HashMap;

async fn pool() -> SqlitePool {
    DbService::new_in_memory()
        .await
        .expect("in-memory database")
        .pool
}

async fn make_kitchen(pool: &SqlitePool, name: &str) -> i64 {
    kitchen::create(
        pool,
        KitchenCreate {
            name: name.to_string(),
            sort: 0,
            is_active: true,
        },
    )
    .await
    .unwrap()
    .id
}

fn dish_payload(name: &str, kitchen_id: i64, images: Vec<&str>) -> DishCreate {
    serde_json::from_value(json!({
        "name": name,
        "kitchen_id": kitchen_id,
        "status": 0,
        "images": images,
    }))
    .unwrap()
}

#[tokio::test]
async fn dish_read_shape_carries_kitchen_name_and_images() {
    let pool = pool().await;
    let kitchen_id = make_kitchen(&pool, "热菜").await;

    let created = dish::create(
        &pool,
        dish_payload("水煮鱼", kitchen_id, vec!["u1?add", "u2?add"]),
    )
    .await
    .unwrap();

    assert_eq!(created.kitchen_name.as_deref(), Some("热菜"));
    // First directive position is the primary image and sorts first
    assert_eq!(created.images, vec!["u1".to_string(), "u2".to_string()]);
}

#[tokio::test]
async fn image_directive_batch_is_atomic() {
    let pool = pool().await;
    let kitchen_id = make_kitchen(&pool, "凉菜").await;

    let created = dish::create(
        &pool,
        dish_payload("口水鸡", kitchen_id, vec!["u1?add", "u2?add"]),
    )
    .await
    .unwrap();

    // A directive referencing a missing image fails the whole step
    let err = dish::update(
        &pool,
        created.dish.id,
        DishUpdate {
            images: Some(vec!["u2?original".to_string(), "uX?delete".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Business(ErrorCode::DishImageNotFound, _)
    ));

    // Nothing was applied: u1 is still the primary image
    let after = dish::get(&pool, created.dish.id).await.unwrap();
    assert_eq!(after.images, vec!["u1".to_string(), "u2".to_string()]);

    // A valid batch applies in order: u2 promoted, u1 removed
    let after = dish::update(
        &pool,
        created.dish.id,
        DishUpdate {
            images: Some(vec!["u2?original".to_string(), "u1?delete".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(after.images, vec!["u2".to_string()]);
}

#[tokio::test]
async fn malformed_image_directives_are_rejected() {
    let pool = pool().await;
    let kitchen_id = make_kitchen(&pool, "蒸菜").await;

    for directive in ["no-question-mark", "?add", "u1?publish"] {
        let err = dish::create(
            &pool,
            dish_payload("粉蒸肉", kitchen_id, vec![directive]),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, RepoError::Business(ErrorCode::InvalidImageDirective, _)),
            "directive {directive:?} must be rejected"
        );
    }
}

#[tokio::test]
async fn kitchen_with_live_dishes_cannot_be_hard_deleted() {
    let pool = pool().await;
    let kitchen_id = make_kitchen(&pool, "烧腊").await;

    let created = dish::create(&pool, dish_payload("叉烧", kitchen_id, vec![]))
        .await
        .unwrap();

    assert!(matches!(
        kitchen::delete(&pool, &[kitchen_id]).await,
        Err(RepoError::Referenced(_))
    ));

    dish::delete(&pool, &[created.dish.id]).await.unwrap();
    kitchen::delete(&pool, &[kitchen_id]).await.unwrap();
}

#[tokio::test]
async fn permission_set_unions_across_roles() {
    let pool = pool().await;

    let menu_a = menu::create(
        &pool,
        MenuCreate {
            title: "菜品查询".to_string(),
            icon: None,
            component: None,
            path: None,
            redirect: None,
            menu_type: 2,
            perms: Some("product.dish.list".to_string()),
            sort: 0,
            disabled: false,
            hidden: false,
            parent_id: None,
        },
    )
    .await
    .unwrap();
    let menu_b = menu::create(
        &pool,
        MenuCreate {
            title: "报表查看".to_string(),
            icon: None,
            component: None,
            path: None,
            redirect: None,
            menu_type: 2,
            perms: Some("report.daily.view".to_string()),
            sort: 0,
            disabled: false,
            hidden: false,
            parent_id: None,
        },
    )
    .await
    .unwrap();

    let role_a = role::create(
        &pool,
        RoleCreate {
            name: "菜品管理员".to_string(),
            role_key: "dish_admin".to_string(),
            sort: 0,
            disabled: false,
            remark: None,
            menu_ids: vec![menu_a.id],
            dept_ids: vec![],
        },
    )
    .await
    .unwrap();
    let role_b = role::create(
        &pool,
        RoleCreate {
            name: "报表查看员".to_string(),
            role_key: "report_viewer".to_string(),
            sort: 0,
            disabled: false,
            remark: None,
            menu_ids: vec![menu_b.id],
            dept_ids: vec![],
        },
    )
    .await
    .unwrap();

    let payload: UserCreate = serde_json::from_value(json!({
        "telephone": "13200000001",
        "name": "两个角色",
        "role_ids": [role_a.id, role_b.id],
    }))
    .unwrap();
    let account = user::create(&pool, payload, "123456").await.unwrap();

    let current = CurrentUser {
        id: account.id,
        telephone: account.telephone.clone(),
        name: account.name.clone(),
        is_superuser: false,
    };
    let perms = resolver::resolve(&pool, &current).await.unwrap();
    assert!(perms.allows("product.dish.list"));
    assert!(perms.allows("report.daily.view"));
    assert!(!perms.allows("auth.user.delete"));

    // The superuser short-circuits to the universal set
    let superuser = CurrentUser {
        id: 1,
        telephone: "15000000000".to_string(),
        name: "超级管理员".to_string(),
        is_superuser: true,
    };
    let perms = resolver::resolve(&pool, &superuser).await.unwrap();
    assert!(perms.allows("absolutely.anything"));
}

#[tokio::test]
async fn settings_batch_update_rejects_unknown_keys() {
    let pool = pool().await;

    let mut values: HashMap<String, Option<String>> = HashMap::new();
    values.insert("web_title".to_string(), Some("新标题".to_string()));
    values.insert("no_such_key".to_string(), Some("x".to_string()));

    assert!(matches!(
        setting::update_values(&pool, &values).await,
        Err(RepoError::NotFound(_))
    ));

    // The known key kept its seeded value
    let entry = setting::get_by_key(&pool, "web_title").await.unwrap();
    assert_eq!(entry.value.as_deref(), Some("Galley 餐饮后台"));

    // A valid batch goes through
    let mut values: HashMap<String, Option<String>> = HashMap::new();
    values.insert("web_title".to_string(), Some("新标题".to_string()));
    assert_eq!(setting::update_values(&pool, &values).await.unwrap(), 1);
    let entry = setting::get_by_key(&pool, "web_title").await.unwrap();
    assert_eq!(entry.value.as_deref(), Some("新标题"));
}
