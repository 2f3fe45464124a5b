use crate::{
    api::ApiClient,
    libs::{config::Config, messages::Message, session::SessionStore},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let store = SessionStore::new()?;
    let Some(session) = store.load()? else {
        msg_bail_anyhow!(Message::NotLoggedIn);
    };
    if session.refresh_token().is_none() {
        msg_bail_anyhow!(Message::NoRefreshToken);
    }

    let client = ApiClient::new(&Config::read()?.server(), None)?;
    let renewed = client.refresh(&session).await?;
    store.save(&renewed)?;

    msg_success!(Message::TokenRefreshed);
    Ok(())
}
