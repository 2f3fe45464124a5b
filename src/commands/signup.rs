use super::anonymous_client;
use crate::{
    api::auth::SignupRequest,
    libs::messages::Message,
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    email: Option<String>,
    #[arg(short, long)]
    phone: Option<String>,
}

fn ask(value: Option<String>, prompt: Message) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .interact_text()?),
    }
}

pub async fn cmd(args: SignupArgs) -> Result<()> {
    let name = ask(args.name, Message::PromptName)?;
    let email = ask(args.email, Message::PromptEmail)?;
    let phone = ask(args.phone, Message::PromptPhone)?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordMismatch.to_string())
        .interact()?;

    let request = SignupRequest {
        name: name.trim(),
        email: email.trim(),
        phone: phone.trim(),
        password: &password,
    };
    let user = anonymous_client()?.signup(&request).await?;

    msg_success!(Message::SignupSuccess(user.email));
    Ok(())
}
