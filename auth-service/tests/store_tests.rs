mod common;

use auth_service::domain::identity::models::AppId;
use auth_service::domain::identity::models::UserId;
use auth_service::domain::identity::ports::AppProvider;
use auth_service::domain::identity::ports::UserProvider;
use auth_service::domain::identity::ports::UserSaver;
use auth_service::identity::errors::StorageError;
use common::TestDb;
use common::APP_ID;
use common::APP_SECRET;

#[tokio::test]
async fn test_save_and_find_user() {
    let db = TestDb::new().await;
    let store = db.store();

    let user_id = store
        .save_user("a@x.com", b"$argon2id$hash")
        .await
        .expect("Failed to save user");

    let user = store
        .find_user_by_email("a@x.com")
        .await
        .expect("Failed to find user");
    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.password_hash, b"$argon2id$hash".to_vec());
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_save_user_assigns_distinct_ids() {
    let db = TestDb::new().await;
    let store = db.store();

    let first = store.save_user("a@x.com", b"h1").await.unwrap();
    let second = store.save_user("b@x.com", b"h2").await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_save_user_duplicate_email() {
    let db = TestDb::new().await;
    let store = db.store();

    store.save_user("a@x.com", b"h1").await.unwrap();
    let result = store.save_user("a@x.com", b"h2").await;

    assert_eq!(result, Err(StorageError::UserExists));
}

#[tokio::test]
async fn test_find_user_by_email_not_found() {
    let db = TestDb::new().await;

    let result = db.store().find_user_by_email("nobody@x.com").await;
    assert_eq!(result, Err(StorageError::UserNotFound));
}

#[tokio::test]
async fn test_find_admin_flag() {
    let db = TestDb::new().await;
    let store = db.store();

    let user_id = store.save_user("a@x.com", b"h1").await.unwrap();
    assert_eq!(store.find_admin_flag(user_id).await, Ok(false));

    db.promote_to_admin(user_id.0).await;
    assert_eq!(store.find_admin_flag(user_id).await, Ok(true));
}

#[tokio::test]
async fn test_find_admin_flag_not_found() {
    let db = TestDb::new().await;

    let result = db.store().find_admin_flag(UserId(404)).await;
    assert_eq!(result, Err(StorageError::UserNotFound));
}

#[tokio::test]
async fn test_find_application_by_id() {
    let db = TestDb::new().await;

    let app = db
        .store()
        .find_application_by_id(AppId(APP_ID))
        .await
        .expect("Failed to find application");
    assert_eq!(app.id, AppId(APP_ID));
    assert_eq!(app.name, "test");
    assert_eq!(app.secret, APP_SECRET.to_vec());
}

#[tokio::test]
async fn test_find_application_by_id_not_found() {
    let db = TestDb::new().await;

    let result = db.store().find_application_by_id(AppId(999)).await;
    assert_eq!(result, Err(StorageError::ApplicationNotFound));
}

#[tokio::test]
async fn test_find_application_by_id_undecodable_row() {
    let db = TestDb::new().await;
    sqlx::query("INSERT INTO apps (id, name, secret) VALUES (3, 'broken', 42)")
        .execute(&db.pool)
        .await
        .unwrap();

    let result = db.store().find_application_by_id(AppId(3)).await;
    assert!(matches!(result, Err(StorageError::Database(_))));
}
