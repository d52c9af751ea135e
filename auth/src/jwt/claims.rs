use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;

/// Claims carried by a session token.
///
/// A token is scoped to exactly one application: it must be verified with
/// the secret of the application named by `app_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject user identifier
    pub uid: i64,

    /// Subject email
    pub email: String,

    /// Application (tenant) the token was issued for
    pub app_id: i32,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims expiring `ttl` after `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `ttl` is not positive, or the expiration overflows
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        if ttl <= Duration::zero() {
            return Err(JwtError::EncodingFailed(format!(
                "token lifetime must be positive, got {}s",
                ttl.num_seconds()
            )));
        }

        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("token expiration out of range".to_string()))?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            exp: expires_at.timestamp(),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Only the tenant claim, read before the signing secret is known.
#[derive(Debug, Deserialize)]
pub(crate) struct TenantClaim {
    pub app_id: i32,
}
