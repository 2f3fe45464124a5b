use super::open_board;
use crate::{
    libs::{board::project, messages::Message, view::View},
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Project id; defaults to the configured board project
    project: Option<String>,
    /// Print the columns as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(args: BoardArgs) -> Result<()> {
    let board = open_board(args.project).await?;
    let tasks = board.snapshot();
    let columns = project(Some(tasks.as_slice()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&columns)?);
        return Ok(());
    }

    msg_print!(Message::BoardHeader(board.project_id().to_owned()), true);
    if tasks.is_empty() {
        msg_info!(Message::BoardEmpty);
    }
    View::board(&columns);
    if columns.unmapped() > 0 {
        msg_warning!(Message::BoardUnmapped(columns.unmapped()));
    }
    Ok(())
}
