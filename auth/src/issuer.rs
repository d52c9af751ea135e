use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::claims::TenantClaim;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;

/// User the token is issued to.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    pub user_id: i64,
    pub email: &'a str,
}

/// Application the token is scoped to, with its signing secret.
#[derive(Clone, Copy)]
pub struct Tenant<'a> {
    pub app_id: i32,
    pub secret: &'a [u8],
}

/// Issues session tokens signed with per-application secrets.
///
/// There is no process-wide signing key. Each token is signed with the
/// secret of the application it is issued for, and must be verified with
/// the secret of the application named in its `app_id` claim.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed, or `ttl` is unusable
    pub fn new_token(
        &self,
        subject: Subject<'_>,
        tenant: Tenant<'_>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.new_token_at(subject, tenant, ttl, Utc::now())
    }

    /// Issue a token valid for `ttl` from `issued_at`.
    ///
    /// Identical inputs always produce the identical token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed, `ttl` is not positive, or the
    ///   expiration does not fit a timestamp
    pub fn new_token_at(
        &self,
        subject: Subject<'_>,
        tenant: Tenant<'_>,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = SessionClaims::new(
            subject.user_id,
            subject.email,
            tenant.app_id,
            issued_at,
            ttl,
        )?;

        JwtHandler::new(tenant.secret).encode(&claims)
    }

    /// Verify a token against the secret of the application it claims.
    ///
    /// `resolve_secret` maps an application ID to its signing secret, or
    /// `None` when the application is unknown.
    ///
    /// # Errors
    /// * `UnknownApplication` - No secret for the token's `app_id`
    /// * `InvalidToken` - Signature does not match that application's secret
    /// * `TokenExpired` - Token is past its `exp`
    /// * `DecodingFailed` - Token is malformed
    pub fn verify<F>(&self, token: &str, resolve_secret: F) -> Result<SessionClaims, JwtError>
    where
        F: FnOnce(i32) -> Option<Vec<u8>>,
    {
        let TenantClaim { app_id } = JwtHandler::decode_unverified(token)?;
        let secret = resolve_secret(app_id).ok_or(JwtError::UnknownApplication(app_id))?;

        let claims: SessionClaims = JwtHandler::new(&secret).decode(token)?;
        Ok(claims)
    }
}
