//! Command implementations.

pub mod auth;
pub mod config;
pub mod lists;

use std::sync::Arc;

use anyhow::{Result, bail};
use tempo_core::api::{AuthClient, TodoApi};
use tempo_core::config::{Config, paths};
use tempo_core::nav::{Redirect, Route, evaluate};
use tempo_core::session::SessionController;
use tempo_core::store::TodoStateStore;
use tempo_core::token::TokenStore;

/// Shared service context: one token store, one session controller, one
/// data store, constructed explicitly and handed to each command.
pub struct AppContext {
    pub tokens: Arc<TokenStore>,
    pub session: Arc<SessionController>,
    pub store: TodoStateStore,
}

impl AppContext {
    pub fn build() -> Result<Self> {
        let config = Config::load()?;
        let tokens = Arc::new(TokenStore::file(paths::token_path())?);
        let session = Arc::new(SessionController::new(
            AuthClient::new(&config)?,
            Arc::clone(&tokens),
        ));
        let api = TodoApi::new(&config, Arc::clone(&tokens))?;
        let store = TodoStateStore::new(api, Arc::clone(&session));
        Ok(Self {
            tokens,
            session,
            store,
        })
    }

    /// Gate for protected commands, same decision the route guard makes.
    pub fn require_login(&self) -> Result<()> {
        if evaluate(Route::Lists, self.tokens.get().is_some()) == Some(Redirect::ToLogin) {
            bail!("Not logged in. Run `tempo login` first.");
        }
        Ok(())
    }

    /// Detects a forced logout that happened during the command.
    pub fn check_session(&self) -> Result<()> {
        if !self.session.state().is_authenticated() {
            bail!("Session expired: the server rejected the credential. Run `tempo login` again.");
        }
        Ok(())
    }
}
