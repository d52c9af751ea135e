use async_trait::async_trait;

use crate::domain::identity::models::AppId;
use crate::domain::identity::models::Application;
use crate::domain::identity::models::User;
use crate::domain::identity::models::UserId;
use crate::identity::errors::AuthError;
use crate::identity::errors::StorageError;

/// Port for authentication service operations.
///
/// Dropping a returned future cancels the operation, including any
/// in-flight store call.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `email` - Login email (non-empty)
    /// * `password` - Plaintext password (non-empty, hashed by the service)
    ///
    /// # Returns
    /// ID assigned to the new user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Verify credentials and issue a session token for an application.
    ///
    /// Credentials are verified before the application is looked up.
    ///
    /// # Arguments
    /// * `email` - Login email
    /// * `password` - Plaintext password
    /// * `app_id` - Application the token is issued for
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidApplication` - Unknown application
    /// * `Internal` - Storage or signing failed
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;

    /// Check whether a user has admin privileges.
    ///
    /// # Errors
    /// * `InvalidUserId` - User does not exist
    /// * `Internal` - Storage failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Capability to persist new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Persist a user and return the ID the store assigned.
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError>;
}

/// Capability to read users.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve a user by email.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError>;

    /// Retrieve the admin flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this ID
    /// * `Database` - Storage operation failed
    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Capability to read applications.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Retrieve an application by ID.
    ///
    /// # Errors
    /// * `ApplicationNotFound` - No application with this ID
    /// * `Database` - Storage operation failed
    async fn find_application_by_id(&self, app_id: AppId) -> Result<Application, StorageError>;
}
