//! Command line interface.
//!
//! Each subcommand lives in its own module exposing an `Args` type and an
//! async `cmd`. [`Cli::menu`] parses the arguments, dispatches, and handles
//! the one cross-cutting failure: when the backend rejects the stored token
//! the session is cleared so the next command asks for a fresh login.

pub mod board;
pub mod comments;
pub mod init;
pub mod login;
pub mod logout;
pub mod projects;
pub mod refresh;
pub mod signup;
pub mod task;
pub mod whoami;

use crate::api::{ApiClient, RepositoryError};
use crate::libs::board::{BoardError, BoardMutator};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::SessionStore;
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the API endpoint and board defaults")]
    Init(init::InitArgs),
    #[command(about = "Sign in and store the session")]
    Login(login::LoginArgs),
    #[command(about = "Create an account")]
    Signup(signup::SignupArgs),
    #[command(about = "Forget the stored session")]
    Logout,
    #[command(about = "Show the logged-in user")]
    Whoami,
    #[command(about = "Renew the access token")]
    Refresh,
    #[command(about = "List and manage projects")]
    Projects(projects::ProjectsArgs),
    #[command(about = "Show a project's task board")]
    Board(board::BoardArgs),
    #[command(about = "Create, remove, move and assign tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Read and write task comments", arg_required_else_help = true)]
    Comments(comments::CommentsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let result = match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Login(args) => login::cmd(args).await,
            Commands::Signup(args) => signup::cmd(args).await,
            Commands::Logout => logout::cmd(),
            Commands::Whoami => whoami::cmd(),
            Commands::Refresh => refresh::cmd().await,
            Commands::Projects(args) => projects::cmd(args).await,
            Commands::Board(args) => board::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Comments(args) => comments::cmd(args).await,
        };

        forget_rejected_session(result, || SessionStore::new()?.clear())
    }
}

/// Drops the stored session when `result` failed on a rejected credential.
///
/// The command's own error is always what comes back; a session that cannot
/// be removed is only logged.
fn forget_rejected_session(result: Result<()>, clear: impl FnOnce() -> Result<bool>) -> Result<()> {
    if let Err(error) = &result {
        if is_unauthorized(error) {
            if let Err(clear_error) = clear() {
                tracing::warn!(error = %format!("{:#}", clear_error), "could not remove the stored session");
            }
            msg_warning!(Message::SessionExpired);
        }
    }
    result
}

/// Whether `error` is, or was caused by, a rejected credential.
pub fn is_unauthorized(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        matches!(cause.downcast_ref::<RepositoryError>(), Some(RepositoryError::Unauthorized))
            || cause.downcast_ref::<BoardError>().is_some_and(BoardError::is_unauthorized)
    })
}

/// Client for the configured server without credentials.
pub(crate) fn anonymous_client() -> Result<ApiClient> {
    Ok(ApiClient::new(&Config::read()?.server(), None)?)
}

/// Client carrying the stored session. Fails when nobody is logged in.
pub(crate) fn authenticated_client() -> Result<ApiClient> {
    let config = Config::read()?;
    let Some(session) = SessionStore::new()?.load()? else {
        msg_bail_anyhow!(Message::NotLoggedIn);
    };
    tracing::debug!(user = %session.user().email, api = %config.server().api_url, "using stored session");
    Ok(ApiClient::new(&config.server(), Some(session))?)
}

/// Project given on the command line, else the configured default.
pub(crate) fn resolve_project(project: Option<String>, config: &Config) -> Result<String> {
    match project.filter(|id| !id.trim().is_empty()) {
        Some(project) => Ok(project.trim().to_owned()),
        None => match config.default_project() {
            Some(project) => Ok(project.to_owned()),
            None => msg_bail_anyhow!(Message::ProjectRequired),
        },
    }
}

/// Board of `project` without its tasks.
pub(crate) fn board_for(project: Option<String>) -> Result<BoardMutator<ApiClient>> {
    let project_id = resolve_project(project, &Config::read()?)?;
    Ok(BoardMutator::new(Arc::new(authenticated_client()?), &project_id))
}

/// Board of `project` with its tasks loaded.
pub(crate) async fn open_board(project: Option<String>) -> Result<BoardMutator<ApiClient>> {
    let board = board_for(project)?;
    board.load().await?;
    Ok(board)
}
