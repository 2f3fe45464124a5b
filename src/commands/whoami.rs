use crate::{
    libs::{config::Config, messages::Message, session::SessionStore},
    msg_info, msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let Some(session) = SessionStore::new()?.load()? else {
        msg_info!(Message::NotLoggedIn);
        return Ok(());
    };

    let user = session.user();
    msg_print!(Message::LoggedInAs {
        name: user.name.clone(),
        email: user.email.clone(),
    });
    if !user.roles.is_empty() {
        msg_print!(Message::UserRoles(user.roles.join(", ")));
    }
    msg_print!(Message::ApiEndpoint(Config::read()?.server().api_url));
    Ok(())
}
