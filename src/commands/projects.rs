//! `projects` subcommands.

use super::authenticated_client;
use crate::{
    libs::{
        messages::Message,
        project::{InviteRequest, ProjectDraft, DEFAULT_INVITE_ROLE},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    command: Option<ProjectsCommand>,
}

#[derive(Debug, Subcommand)]
enum ProjectsCommand {
    /// List your projects (default)
    List,
    /// Show a project and its members
    Show { id: String },
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Invite people by email, comma separated
    Invite {
        id: String,
        emails: String,
        #[arg(short, long, default_value = DEFAULT_INVITE_ROLE)]
        role: String,
    },
}

pub async fn cmd(args: ProjectsArgs) -> Result<()> {
    match args.command.unwrap_or(ProjectsCommand::List) {
        ProjectsCommand::List => handle_list().await,
        ProjectsCommand::Show { id } => handle_show(&id).await,
        ProjectsCommand::Create { name, description } => handle_create(&name, description.as_deref()).await,
        ProjectsCommand::Update { id, name, description } => {
            handle_update(&id, name.as_deref(), description.as_deref()).await
        }
        ProjectsCommand::Delete { id, yes } => handle_delete(&id, yes).await,
        ProjectsCommand::Invite { id, emails, role } => handle_invite(&id, &emails, &role).await,
    }
}

async fn handle_list() -> Result<()> {
    let projects = authenticated_client()?.projects().await?;
    if projects.is_empty() {
        msg_info!(Message::NoProjects);
        return Ok(());
    }

    msg_print!(Message::ProjectsHeader, true);
    View::projects(&projects);
    Ok(())
}

async fn handle_show(id: &str) -> Result<()> {
    let project = authenticated_client()?.project(id).await?;

    msg_print!(Message::ProjectHeader(project.name.clone()), true);
    if let Some(description) = project.description.as_deref().filter(|text| !text.is_empty()) {
        msg_print!(description);
    }
    msg_print!(Message::ProjectMembersHeader, true);
    if project.members.is_empty() {
        msg_info!(Message::NoProjectMembers);
    } else {
        View::members(&project.members);
    }
    Ok(())
}

async fn handle_create(name: &str, description: Option<&str>) -> Result<()> {
    let draft = ProjectDraft::new(name, description)?;
    let project = authenticated_client()?.create_project(&draft).await?;
    msg_success!(Message::ProjectCreated {
        name: project.name,
        id: project.id,
    });
    Ok(())
}

async fn handle_update(id: &str, name: Option<&str>, description: Option<&str>) -> Result<()> {
    if name.is_none() && description.is_none() {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }
    let draft = ProjectDraft::patch(name, description)?;
    let project = authenticated_client()?.update_project(id, &draft).await?;
    msg_success!(Message::ProjectUpdated(project.name));
    Ok(())
}

async fn handle_delete(id: &str, yes: bool) -> Result<()> {
    let client = authenticated_client()?;
    if !yes {
        let project = client.project(id).await?;
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteProject(project.name).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    client.delete_project(id).await?;
    msg_success!(Message::ProjectDeleted(id.to_owned()));
    Ok(())
}

async fn handle_invite(id: &str, emails: &str, role: &str) -> Result<()> {
    let invite = InviteRequest::parse(emails, role)?;
    authenticated_client()?.invite_members(id, &invite).await?;
    msg_success!(Message::MembersInvited {
        count: invite.emails.len(),
        role: invite.role,
    });
    Ok(())
}
