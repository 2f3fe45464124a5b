//! Authentication endpoints.
//!
//! Sign-in yields a [`Session`]; the caller decides where it lives. The
//! backend answers with `accessToken`, older deployments with `token`, and
//! both are accepted.

use super::{ApiClient, RepositoryError, RepositoryResult};
use crate::libs::session::{Session, SessionUser};
use crate::libs::task::string_or_number;
use serde::{Deserialize, Serialize};

const SIGNIN_URL: &str = "auth/signin";
const SIGNUP_URL: &str = "auth/signup";
const REFRESH_URL: &str = "auth/refresh-token";

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthResponse {
    /// Turns a sign-in answer into a session; an answer without a token is malformed.
    pub fn into_session(self) -> RepositoryResult<Session> {
        let access_token = self
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| RepositoryError::Decode("sign-in response carries no token".to_owned()))?;
        let user = SessionUser {
            id: self.id,
            name: self.name,
            email: self.email,
            roles: self.roles,
        };
        Ok(Session::new(user, &access_token, self.refresh_token))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    #[serde(default, alias = "token")]
    access_token: Option<String>,
}

impl ApiClient {
    pub async fn signin(&self, email: &str, password: &str) -> RepositoryResult<Session> {
        let response: AuthResponse = self.public(SIGNIN_URL, &LoginRequest { email, password }).await?;
        response.into_session()
    }

    /// Registers an account. The response is the created user, not a session.
    pub async fn signup(&self, request: &SignupRequest<'_>) -> RepositoryResult<SessionUser> {
        let response: AuthResponse = self.public(SIGNUP_URL, request).await?;
        Ok(SessionUser {
            id: response.id,
            name: response.name,
            email: response.email,
            roles: response.roles,
        })
    }

    /// Exchanges the session's refresh token for a new access token.
    pub async fn refresh(&self, session: &Session) -> RepositoryResult<Session> {
        let refresh_token = session.refresh_token().ok_or(RepositoryError::Unauthorized)?;
        let response: RefreshResponse = self.public(REFRESH_URL, &RefreshRequest { refresh_token }).await?;
        match response.access_token {
            Some(token) if !token.is_empty() => Ok(session.clone().with_access_token(&token)),
            _ => Err(RepositoryError::Unauthorized),
        }
    }
}
