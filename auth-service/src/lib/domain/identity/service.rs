use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;

use crate::domain::identity::models::AppId;
use crate::domain::identity::models::UserId;
use crate::identity::errors::AuthError;
use crate::identity::errors::StorageError;
use crate::identity::ports::AppProvider;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::UserProvider;
use crate::identity::ports::UserSaver;

/// Domain service implementation for authentication operations.
///
/// Depends only on the store capabilities, so any store (or an in-memory
/// fake) can be plugged in.
pub struct AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    token_ttl: Duration,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl<US, UP, AP> AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    /// Create a new authentication service with injected capabilities.
    ///
    /// # Arguments
    /// * `user_saver` - Persists new users
    /// * `user_provider` - Reads users and admin flags
    /// * `app_provider` - Reads applications and their signing secrets
    /// * `token_ttl` - Validity period of issued session tokens
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_ttl,
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(),
        }
    }

    /// Replace the password hasher (and with it the work cost of new hashes).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(anyhow::Error::from)?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// A hash that cannot be parsed counts as a mismatch.
    async fn verify_password(&self, password: &str, stored_hash: &[u8]) -> Result<bool, AuthError> {
        let Ok(stored_hash) = std::str::from_utf8(stored_hash) else {
            tracing::warn!("stored password hash is not valid UTF-8");
            return Ok(false);
        };

        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(anyhow::Error::from)?;

        match outcome {
            Ok(is_valid) => Ok(is_valid),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl<US, UP, AP> AuthServicePort for AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    #[tracing::instrument(name = "register", skip_all)]
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        tracing::info!("registering user");

        let password_hash = self.hash_password(password).await.map_err(|e| {
            tracing::error!(error = %e, "failed to generate password hash");
            e
        })?;

        match self
            .user_saver
            .save_user(email, password_hash.as_bytes())
            .await
        {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "user registered");
                Ok(user_id)
            }
            Err(StorageError::UserExists) => {
                tracing::warn!("user already exists");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save user");
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }

    #[tracing::instrument(name = "login", skip_all, fields(app_id = %app_id))]
    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        tracing::info!("attempting to login user");

        let user = match self.user_provider.find_user_by_email(email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                tracing::warn!("user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get user");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let application = match self.app_provider.find_application_by_id(app_id).await {
            Ok(application) => application,
            Err(StorageError::ApplicationNotFound) => {
                tracing::warn!("application not found");
                return Err(AuthError::InvalidApplication);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get application");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        let token = self
            .token_issuer
            .new_token(user.as_subject(), application.as_tenant(), self.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to generate token");
                AuthError::Internal(e.to_string())
            })?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    #[tracing::instrument(name = "is_admin", skip_all, fields(user_id = %user_id))]
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        tracing::info!("checking if user is an admin");

        match self.user_provider.find_admin_flag(user_id).await {
            Ok(is_admin) => {
                tracing::info!(is_admin, "checked if user is an admin");
                Ok(is_admin)
            }
            Err(StorageError::UserNotFound) => {
                tracing::warn!("user not found");
                Err(AuthError::InvalidUserId)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to check if user is an admin");
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }
}
