//! Remote collaborators of the board: the ProjectStack REST API.
//!
//! [`TaskRepository`] is the seam the board core depends on. [`ApiClient`]
//! implements it over HTTP and also exposes the project and authentication
//! endpoints used by the command layer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use projectstack::api::{ApiClient, TaskRepository};
//! use projectstack::libs::config::Config;
//! use projectstack::libs::session::SessionStore;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let session = SessionStore::new()?.load()?;
//! let api = ApiClient::new(&config.server(), session)?;
//! let tasks = api.list("p-1").await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::task::{Comment, Task, TaskDraft, TaskPatch};
use async_trait::async_trait;
use thiserror::Error;

pub mod auth;
pub mod client;
pub mod projects;
pub mod tasks;

pub use client::ApiClient;

/// Failure of a call to the remote API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No credential, or the server rejected it (HTTP 401).
    #[error("not authorized")]
    Unauthorized,

    #[error("access denied")]
    Forbidden,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    #[error("unexpected response (HTTP {status}): {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(error: reqwest::Error) -> Self {
        RepositoryError::Transport(error.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence contract for a project's tasks and their comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self, project_id: &str) -> RepositoryResult<Vec<Task>>;

    /// Creates a task; the returned copy carries the server-assigned id.
    async fn create(&self, project_id: &str, draft: &TaskDraft) -> RepositoryResult<Task>;

    async fn remove(&self, project_id: &str, task_id: &str) -> RepositoryResult<()>;

    async fn update(&self, project_id: &str, task_id: &str, patch: &TaskPatch) -> RepositoryResult<Task>;

    async fn list_comments(&self, project_id: &str, task_id: &str) -> RepositoryResult<Vec<Comment>>;

    async fn add_comment(&self, project_id: &str, task_id: &str, text: &str) -> RepositoryResult<Comment>;

    async fn remove_comment(&self, project_id: &str, task_id: &str, comment_id: &str) -> RepositoryResult<()>;
}
