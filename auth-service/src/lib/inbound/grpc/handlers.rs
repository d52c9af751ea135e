use tonic::Status;

use crate::identity::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

/// Every service failure leaves the boundary as the same opaque status.
/// The error kind stays in the logs.
pub(crate) fn internal_status(operation: &'static str, err: AuthError) -> Status {
    match &err {
        AuthError::Internal(_) => tracing::error!(operation, error = %err, "request failed"),
        _ => tracing::warn!(operation, error = %err, "request rejected"),
    }
    Status::internal("internal error")
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use mockall::mock;

    use crate::domain::identity::models::AppId;
    use crate::domain::identity::models::UserId;
    use crate::domain::identity::ports::AuthServicePort;
    use crate::identity::errors::AuthError;

    mock! {
        pub TestAuthService {}

        #[async_trait]
        impl AuthServicePort for TestAuthService {
            async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;
            async fn login(&self, email: &str, password: &str, app_id: AppId) -> Result<String, AuthError>;
            async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
        }
    }
}
