//! Task and comment endpoints: the HTTP [`TaskRepository`].

use super::{ApiClient, RepositoryResult, TaskRepository};
use crate::libs::task::{Comment, Task, TaskDraft, TaskPatch};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct NewComment<'a> {
    text: &'a str,
}

fn tasks_path(project_id: &str) -> String {
    format!("projects/{}/tasks", project_id)
}

fn task_path(project_id: &str, task_id: &str) -> String {
    format!("projects/{}/tasks/{}", project_id, task_id)
}

fn comments_path(project_id: &str, task_id: &str) -> String {
    format!("projects/{}/tasks/{}/comments", project_id, task_id)
}

#[async_trait]
impl TaskRepository for ApiClient {
    async fn list(&self, project_id: &str) -> RepositoryResult<Vec<Task>> {
        // The backend answers `null` for a project without tasks.
        let tasks: Option<Vec<Task>> = self.get(&tasks_path(project_id)).await?;
        Ok(tasks.unwrap_or_default())
    }

    async fn create(&self, project_id: &str, draft: &TaskDraft) -> RepositoryResult<Task> {
        self.send(Method::POST, &tasks_path(project_id), draft).await
    }

    async fn remove(&self, project_id: &str, task_id: &str) -> RepositoryResult<()> {
        self.call::<()>(Method::DELETE, &task_path(project_id, task_id), None).await
    }

    async fn update(&self, project_id: &str, task_id: &str, patch: &TaskPatch) -> RepositoryResult<Task> {
        self.send(Method::PUT, &task_path(project_id, task_id), patch).await
    }

    async fn list_comments(&self, project_id: &str, task_id: &str) -> RepositoryResult<Vec<Comment>> {
        let comments: Option<Vec<Comment>> = self.get(&comments_path(project_id, task_id)).await?;
        Ok(comments.unwrap_or_default())
    }

    async fn add_comment(&self, project_id: &str, task_id: &str, text: &str) -> RepositoryResult<Comment> {
        self.send(Method::POST, &comments_path(project_id, task_id), &NewComment { text }).await
    }

    async fn remove_comment(&self, project_id: &str, task_id: &str, comment_id: &str) -> RepositoryResult<()> {
        let path = format!("{}/{}", comments_path(project_id, task_id), comment_id);
        self.call::<()>(Method::DELETE, &path, None).await
    }
}
