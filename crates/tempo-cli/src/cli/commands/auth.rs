//! Account commands (register, login, logout).

use anyhow::{Result, bail};
use tempo_core::session::SessionState;

use super::AppContext;

pub async fn register(username: &str, email: &str, password: &str) -> Result<()> {
    let ctx = AppContext::build()?;
    ctx.session.register(username, email, password).await;
    match ctx.session.state() {
        SessionState::Authenticated => {
            println!("Registered and logged in as {email}");
            Ok(())
        }
        SessionState::Error(reason) => bail!("Registration failed: {reason}"),
        state => bail!("Unexpected session state: {state:?}"),
    }
}

pub async fn login(email: &str, password: &str) -> Result<()> {
    let ctx = AppContext::build()?;
    ctx.session.login(email, password).await;
    match ctx.session.state() {
        SessionState::Authenticated => {
            println!("Logged in as {email}");
            Ok(())
        }
        SessionState::Error(reason) => bail!("Login failed: {reason}"),
        state => bail!("Unexpected session state: {state:?}"),
    }
}

pub fn logout() -> Result<()> {
    let ctx = AppContext::build()?;
    if ctx.tokens.get().is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}
