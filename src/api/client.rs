//! HTTP plumbing shared by the API modules.

use super::{RepositoryError, RepositoryResult};
use crate::libs::config::ServerConfig;
use crate::libs::session::Session;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Client for the ProjectStack REST API.
///
/// Authenticated calls send `Authorization: Bearer <token>` from the
/// [`Session`] given at construction. Without a session they fail with
/// [`RepositoryError::Unauthorized`] before any request is made.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: &ServerConfig, session: Option<Session>) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            session,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, method: Method, path: &str) -> RepositoryResult<RequestBuilder> {
        let session = self.session.as_ref().ok_or(RepositoryError::Unauthorized)?;
        Ok(self
            .client
            .request(method, self.url(path))
            .header(header::AUTHORIZATION, format!("Bearer {}", session.access_token())))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<T> {
        let request = self.authorized(Method::GET, path)?;
        decode(execute(path, request).await?).await
    }

    pub(crate) async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(method, path)?.json(body);
        decode(execute(path, request).await?).await
    }

    /// Sends an authenticated request whose response body is ignored.
    pub(crate) async fn call<B>(&self, method: Method, path: &str, body: Option<&B>) -> RepositoryResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.authorized(method, path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        execute(path, request).await?;
        Ok(())
    }

    /// Sends an unauthenticated request, as used by sign-in and sign-up.
    pub(crate) async fn public<B, T>(&self, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        decode(execute(path, request).await?).await
    }
}

async fn execute(path: &str, request: RequestBuilder) -> RepositoryResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    tracing::debug!(path, status = status.as_u16(), "api response");

    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => RepositoryError::Unauthorized,
        StatusCode::FORBIDDEN => RepositoryError::Forbidden,
        StatusCode::NOT_FOUND => RepositoryError::NotFound(path.to_owned()),
        status if status.is_server_error() => RepositoryError::Server { status: status.as_u16() },
        status => RepositoryError::UnexpectedStatus {
            status: status.as_u16(),
            message: error_message(&message),
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|error| RepositoryError::Decode(error.to_string()))
}

/// Pulls `message` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(session: Option<Session>) -> ApiClient {
        let config = ServerConfig {
            api_url: "http://localhost:8080/api/".into(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn urls_join_without_double_slashes() {
        assert_eq!(client(None).url("/projects/1/tasks"), "http://localhost:8080/api/projects/1/tasks");
        assert_eq!(client(None).url("auth/signin"), "http://localhost:8080/api/auth/signin");
    }

    #[test]
    fn authenticated_request_without_session_is_unauthorized() {
        let error = client(None).authorized(Method::GET, "projects").unwrap_err();
        assert_eq!(error, RepositoryError::Unauthorized);
    }

    #[test]
    fn error_message_prefers_json_message_field() {
        assert_eq!(error_message(r#"{"message":"Title is required"}"#), "Title is required");
        assert_eq!(error_message("  plain failure \n"), "plain failure");
    }
}
