use super::board_for;
use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CommentsArgs {
    /// Project id; defaults to the configured board project
    #[arg(short = 'P', long, global = true)]
    project: Option<String>,
    #[command(subcommand)]
    command: CommentsCommand,
}

#[derive(Debug, Subcommand)]
enum CommentsCommand {
    List { task: String },
    Add { task: String, text: String },
    Rm { task: String, comment: String },
}

pub async fn cmd(args: CommentsArgs) -> Result<()> {
    let board = board_for(args.project)?;
    match args.command {
        CommentsCommand::List { task } => {
            let comments = board.comments(&task).await?;
            msg_print!(Message::CommentsHeader(task), true);
            if comments.is_empty() {
                msg_info!(Message::NoComments);
            } else {
                View::comments(&comments);
            }
        }
        CommentsCommand::Add { task, text } => {
            board.add_comment(&task, &text).await?;
            msg_success!(Message::CommentAdded);
        }
        CommentsCommand::Rm { task, comment } => {
            board.remove_comment(&task, &comment).await?;
            msg_success!(Message::CommentRemoved(comment));
        }
    }
    Ok(())
}
