use anyhow::Context;
use tracing::info;
use turi_client::{Credential, Session};

use crate::error::CommandError;

pub fn login(session: &Session, token: String, username: Option<String>) -> anyhow::Result<String> {
    if token.trim().is_empty() {
        return Err(CommandError::EmptyToken.into());
    }
    let mut credential = Credential::new(token.trim());
    if let Some(username) = username {
        credential = credential.with_username(username);
    }
    session
        .sign_in(&credential)
        .context("Failed to store credential")?;
    info!(username = ?credential.username, "Credential stored");
    Ok("Logged in\n".into())
}

pub fn logout(session: &Session) -> anyhow::Result<String> {
    session.sign_out().context("Failed to remove credential")?;
    info!("Credential removed");
    Ok("Logged out\n".into())
}
