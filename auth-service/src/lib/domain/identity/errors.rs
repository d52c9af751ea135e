use thiserror::Error;

/// Failures reported by the credential store capabilities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

/// Outcome of a failed authentication service operation.
///
/// Store conditions are mapped into these kinds exactly once, in the
/// service. `Internal` keeps its cause for operator logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid application ID")]
    InvalidApplication,

    #[error("Invalid user ID")]
    InvalidUserId,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}
