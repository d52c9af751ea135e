use std::fmt;

/// Registered user as held by the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Argon2id PHC string, stored as opaque bytes
    pub password_hash: Vec<u8>,
    pub is_admin: bool,
}

/// User unique identifier, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registered client application (tenant).
///
/// Seeded outside this service and read-only here.
#[derive(Clone, PartialEq, Eq)]
pub struct Application {
    pub id: AppId,
    pub name: String,
    /// Key used to sign this application's session tokens
    pub secret: Vec<u8>,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Application unique identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(pub i32);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl User {
    pub(crate) fn as_subject(&self) -> auth::Subject<'_> {
        auth::Subject {
            user_id: self.id.0,
            email: &self.email,
        }
    }
}

impl Application {
    pub(crate) fn as_tenant(&self) -> auth::Tenant<'_> {
        auth::Tenant {
            app_id: self.id.0,
            secret: &self.secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_debug_hides_secret() {
        let app = Application {
            id: AppId(1),
            name: "web".to_string(),
            secret: b"top-secret".to_vec(),
        };

        let rendered = format!("{:?}", app);
        assert!(rendered.contains("web"));
        assert!(!rendered.contains("top-secret"));
    }
}
