use super::anonymous_client;
use crate::{
    api::RepositoryError,
    libs::{messages::Message, session::SessionStore},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email; asked for when omitted
    #[arg(short, long)]
    email: Option<String>,
}

pub async fn cmd(args: LoginArgs) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let session = match anonymous_client()?.signin(email.trim(), &password).await {
        Ok(session) => session,
        Err(RepositoryError::Unauthorized | RepositoryError::Forbidden) => msg_bail_anyhow!(Message::LoginFailed),
        Err(error) => return Err(error.into()),
    };

    SessionStore::new()?.save(&session)?;
    tracing::debug!(user = %session.user().id, "session stored");
    msg_success!(Message::LoginSuccess(session.user().name.clone()));
    Ok(())
}
