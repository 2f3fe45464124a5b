//! `task` subcommands, applied through the board so a rejected change is
//! rolled back and reported.

use super::open_board;
use crate::{
    api::ApiClient,
    libs::{
        board::{BoardError, BoardMutator},
        messages::Message,
        task::{parse_due_date, Member, Priority, TaskDraft, TaskStatus},
    },
    msg_bail_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Project id; defaults to the configured board project
    #[arg(short = 'P', long, global = true)]
    project: Option<String>,
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// todo, in-progress or done
        #[arg(short, long, default_value = "todo")]
        status: String,
        /// low, medium or high
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(short, long)]
        assignee: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// Comma separated
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete a task
    Rm {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Move a task to another column
    Move { id: String, status: String },
    /// Assign a task, or unassign it when no name is given
    Assign { id: String, assignee: Option<String> },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let board = open_board(args.project).await?;
    let result = match args.command {
        TaskCommand::Add {
            title,
            description,
            status,
            priority,
            assignee,
            due,
            tags,
        } => {
            let draft = build_draft(&title, description, &status, priority, assignee, due, tags)?;
            handle_add(&board, draft).await
        }
        TaskCommand::Rm { id, yes } => handle_rm(&board, &id, yes).await,
        TaskCommand::Move { id, status } => handle_move(&board, &id, &status).await,
        TaskCommand::Assign { id, assignee } => handle_assign(&board, &id, assignee).await,
    };
    result.map_err(explain)
}

fn build_draft(
    title: &str,
    description: Option<String>,
    status: &str,
    priority: Option<String>,
    assignee: Option<String>,
    due: Option<String>,
    tags: Option<String>,
) -> Result<TaskDraft> {
    let mut draft = TaskDraft::new(title).with_status(TaskStatus::parse_known(status)?);
    if let Some(description) = description {
        draft = draft.with_description(&description);
    }
    if let Some(priority) = priority {
        draft = draft.with_priority(priority.parse::<Priority>()?);
    }
    if let Some(assignee) = assignee.filter(|name| !name.trim().is_empty()) {
        draft = draft.with_assignee(Member::named(&assignee));
    }
    if let Some(due) = due {
        match parse_due_date(&due) {
            Some(date) => draft = draft.with_due_date(date),
            None => msg_bail_anyhow!(Message::InvalidDueDate(due)),
        }
    }
    if let Some(tags) = tags {
        draft = draft.with_tags(tags.split(',').map(str::to_owned).collect());
    }
    Ok(draft)
}

async fn handle_add(board: &BoardMutator<ApiClient>, draft: TaskDraft) -> Result<()> {
    let task = board.create(draft).await?;
    msg_success!(Message::TaskCreated {
        title: task.title,
        id: task.id,
    });
    Ok(())
}

async fn handle_rm(board: &BoardMutator<ApiClient>, id: &str, yes: bool) -> Result<()> {
    let Some(task) = board.task(id) else {
        msg_bail_anyhow!(Message::TaskNotFound(id.to_owned()));
    };
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    board.delete(id).await?;
    msg_success!(Message::TaskRemoved(id.to_owned()));
    Ok(())
}

async fn handle_move(board: &BoardMutator<ApiClient>, id: &str, status: &str) -> Result<()> {
    let status = TaskStatus::parse_known(status)?;
    let task = board.move_task(id, status).await?;
    msg_success!(Message::TaskMoved {
        id: task.id,
        status: task.status.title().to_owned(),
    });
    Ok(())
}

async fn handle_assign(board: &BoardMutator<ApiClient>, id: &str, assignee: Option<String>) -> Result<()> {
    let member = assignee.filter(|name| !name.trim().is_empty()).map(|name| Member::named(&name));
    let task = board.assign(id, member).await?;
    match task.assignee.as_ref().and_then(Member::display_name) {
        Some(name) => msg_success!(Message::TaskAssigned {
            id: task.id.clone(),
            assignee: name.to_owned(),
        }),
        None => msg_success!(Message::TaskUnassigned(task.id.clone())),
    }
    Ok(())
}

/// Tells the user a failed change was undone before passing the error on.
fn explain(error: anyhow::Error) -> anyhow::Error {
    if let Some(BoardError::Repository { operation, .. }) = error.downcast_ref::<BoardError>() {
        if operation.task_id().is_some() {
            msg_warning!(Message::ChangeRolledBack(operation.to_string()));
        }
    }
    error
}
