//! Text of the [`Message`] catalogue.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === CONFIG ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleBoard => "Board settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure (space to select, enter to confirm)".to_string(),
            Message::PromptServerApiUrl => "API base URL".to_string(),
            Message::PromptServerTimeout => "Request timeout in seconds".to_string(),
            Message::PromptDefaultProject => "Default project id (empty for none)".to_string(),

            // === AUTH ===
            Message::PromptName => "Name".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPhone => "Phone".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),
            Message::LoginSuccess(name) => format!("Logged in as {}", name),
            Message::LoginFailed => "Invalid email or password".to_string(),
            Message::SignupSuccess(email) => format!("Account created for {}. You can log in now", email),
            Message::LoggedOut => "Logged out".to_string(),
            Message::NotLoggedIn => "You are not logged in. Run `projectstack login` first".to_string(),
            Message::LoggedInAs { name, email } => format!("{} <{}>", name, email),
            Message::UserRoles(roles) => format!("Roles: {}", roles),
            Message::SessionExpired => "Your session has expired. Run `projectstack login` to sign in again".to_string(),
            Message::SessionCorrupted => "Stored session could not be read and was discarded".to_string(),
            Message::TokenRefreshed => "Access token refreshed".to_string(),
            Message::NoRefreshToken => "The stored session has no refresh token. Log in again".to_string(),
            Message::ApiEndpoint(url) => format!("API: {}", url),

            // === PROJECTS ===
            Message::ProjectsHeader => "Projects".to_string(),
            Message::NoProjects => "No projects yet".to_string(),
            Message::ProjectHeader(name) => format!("Project: {}", name),
            Message::ProjectMembersHeader => "Members".to_string(),
            Message::NoProjectMembers => "No members".to_string(),
            Message::ProjectCreated { name, id } => format!("Project '{}' created with id {}", name, id),
            Message::ProjectUpdated(name) => format!("Project '{}' updated", name),
            Message::ProjectDeleted(id) => format!("Project {} deleted", id),
            Message::ProjectRequired => {
                "No project given. Pass a project id or set a default with `projectstack init`".to_string()
            }
            Message::ConfirmDeleteProject(name) => format!("Delete project '{}' and all its tasks?", name),
            Message::NothingToUpdate => "Nothing to update. Pass --name or --description".to_string(),
            Message::MembersInvited { count, role } => format!("Sent {} invitation(s) as {}", count, role),

            // === BOARD & TASKS ===
            Message::BoardHeader(project) => format!("Board of project {}", project),
            Message::BoardEmpty => "This project has no tasks yet".to_string(),
            Message::BoardUnmapped(count) => format!("{} task(s) with an unknown status are not shown", count),
            Message::TaskCreated { title, id } => format!("Task '{}' created with id {}", title, id),
            Message::TaskRemoved(id) => format!("Task {} removed", id),
            Message::TaskMoved { id, status } => format!("Task {} moved to {}", id, status),
            Message::TaskAssigned { id, assignee } => format!("Task {} assigned to {}", id, assignee),
            Message::TaskUnassigned(id) => format!("Task {} is now unassigned", id),
            Message::TaskNotFound(id) => format!("Task {} is not on this board", id),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD", value),

            // === COMMENTS ===
            Message::CommentsHeader(task) => format!("Comments on task {}", task),
            Message::NoComments => "No comments yet".to_string(),
            Message::CommentAdded => "Comment added".to_string(),
            Message::CommentRemoved(id) => format!("Comment {} removed", id),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::ChangeRolledBack(operation) => format!("Could not {}, the board was restored", operation),
        };
        write!(f, "{}", s)
    }
}
