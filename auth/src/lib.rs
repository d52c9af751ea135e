//! Credential primitives for the authentication service
//!
//! - Password hashing (Argon2id, tunable work cost)
//! - Session claims and HS256 JWT handling
//! - Token issuance with per-application signing secrets
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(8, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Issuing and Verifying Session Tokens
//! ```
//! use auth::{Subject, Tenant, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new();
//! let token = issuer
//!     .new_token(
//!         Subject { user_id: 1, email: "a@x.com" },
//!         Tenant { app_id: 1, secret: b"app-secret" },
//!         Duration::hours(1),
//!     )
//!     .unwrap();
//!
//! // Relying parties look the key up by the token's own `app_id` claim
//! let claims = issuer
//!     .verify(&token, |app_id| (app_id == 1).then(|| b"app-secret".to_vec()))
//!     .unwrap();
//! assert_eq!(claims.uid, 1);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::Subject;
pub use issuer::Tenant;
pub use issuer::TokenIssuer;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
