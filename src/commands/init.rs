//! Interactive configuration wizard.

use crate::{
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Print the effective configuration instead of editing it
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.show {
        let config = Config::read()?;
        msg_info!(Message::ApiEndpoint(config.server().api_url));
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
