use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::identity::models::AppId;
use crate::domain::identity::models::Application;
use crate::domain::identity::models::User;
use crate::domain::identity::models::UserId;
use crate::domain::identity::ports::AppProvider;
use crate::domain::identity::ports::UserProvider;
use crate::domain::identity::ports::UserSaver;
use crate::identity::errors::StorageError;

/// Credential store backed by SQLite.
///
/// Implements every store capability; the same instance is handed to the
/// service once per capability.
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn database_error(e: sqlx::Error) -> StorageError {
    StorageError::Database(e.to_string())
}

fn user_from_row(row: SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId(row.try_get("id")?),
        email: row.try_get("email")?,
        password_hash: row.try_get("pass_hash")?,
        is_admin: row.try_get("is_admin")?,
    })
}

fn application_from_row(row: SqliteRow) -> Result<Application, sqlx::Error> {
    let id: i64 = row.try_get("id")?;
    let id = i32::try_from(id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Application {
        id: AppId(id),
        name: row.try_get("name")?,
        secret: row.try_get("secret")?,
    })
}

#[async_trait]
impl UserSaver for SqliteCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserExists;
                }
            }
            database_error(e)
        })?;

        Ok(UserId(result.last_insert_rowid()))
    }
}

#[async_trait]
impl UserProvider for SqliteCredentialStore {
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => user_from_row(r).map_err(database_error),
            None => Err(StorageError::UserNotFound),
        }
    }

    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StorageError> {
        let is_admin: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        is_admin.ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for SqliteCredentialStore {
    async fn find_application_by_id(&self, app_id: AppId) -> Result<Application, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => application_from_row(r).map_err(database_error),
            None => Err(StorageError::ApplicationNotFound),
        }
    }
}
