//! Authenticated session and its persistence.
//!
//! A [`Session`] is created by a successful sign-in and handed explicitly to
//! [`ApiClient`](crate::api::ApiClient); nothing reads credentials from
//! ambient state. [`SessionStore`] keeps it between invocations, encrypted,
//! and is cleared at logout or when the server stops accepting the token.

use super::secret::Secret;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

const SESSION_FILE: &str = ".session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: SessionUser,
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl Session {
    pub fn new(user: SessionUser, access_token: &str, refresh_token: Option<String>) -> Self {
        Self {
            user,
            access_token: access_token.to_owned(),
            refresh_token,
        }
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Same session with a renewed access token.
    pub fn with_access_token(mut self, access_token: &str) -> Self {
        self.access_token = access_token.to_owned();
        self
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Encrypted on-disk home of the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    secret: Secret,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        Ok(Self::with_secret(Secret::new(SESSION_FILE)?))
    }

    pub fn with_secret(secret: Secret) -> Self {
        Self { secret }
    }

    /// The stored session, or `None` when logged out.
    ///
    /// A file that no longer decrypts (for example after a rebuild with new
    /// keys) is discarded and reported as logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        let stored = match self.secret.read() {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(error = %error, "discarding unreadable session file");
                self.secret.remove()?;
                return Ok(None);
            }
        };
        match stored {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        self.secret.write(&serde_json::to_string(session)?)
    }

    /// Forgets the session. Returns `false` when already logged out.
    pub fn clear(&self) -> Result<bool> {
        self.secret.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            SessionUser {
                id: "u-1".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                roles: vec!["ROLE_USER".into()],
            },
            "access-1",
            Some("refresh-1".into()),
        )
    }

    #[test]
    fn debug_output_hides_tokens() {
        let printed = format!("{:?}", session());
        assert!(!printed.contains("access-1"));
        assert!(!printed.contains("refresh-1"));
        assert!(printed.contains("Ada"));
    }

    #[test]
    fn renewed_token_keeps_user_and_refresh_token() {
        let renewed = session().with_access_token("access-2");
        assert_eq!(renewed.access_token(), "access-2");
        assert_eq!(renewed.refresh_token(), Some("refresh-1"));
        assert_eq!(renewed.user().email, "ada@example.com");
    }
}
