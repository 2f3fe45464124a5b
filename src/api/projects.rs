//! Project endpoints: listing, CRUD and member invitations.

use super::{ApiClient, RepositoryResult};
use crate::libs::project::{InviteRequest, Project, ProjectDraft};
use reqwest::Method;

impl ApiClient {
    /// Projects visible to the logged-in user.
    pub async fn projects(&self) -> RepositoryResult<Vec<Project>> {
        let projects: Option<Vec<Project>> = self.get("projects").await?;
        Ok(projects.unwrap_or_default())
    }

    pub async fn project(&self, project_id: &str) -> RepositoryResult<Project> {
        self.get(&format!("projects/{}", project_id)).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> RepositoryResult<Project> {
        self.send(Method::POST, "projects", draft).await
    }

    pub async fn update_project(&self, project_id: &str, draft: &ProjectDraft) -> RepositoryResult<Project> {
        self.send(Method::PUT, &format!("projects/{}", project_id), draft).await
    }

    /// Deletes a project; the backend removes its tasks with it.
    pub async fn delete_project(&self, project_id: &str) -> RepositoryResult<()> {
        self.call::<()>(Method::DELETE, &format!("projects/{}", project_id), None).await
    }

    pub async fn invite_members(&self, project_id: &str, invite: &InviteRequest) -> RepositoryResult<()> {
        self.call(Method::POST, &format!("projects/{}/invites", project_id), Some(invite)).await
    }
}
