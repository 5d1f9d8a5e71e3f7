//! Authentication session state machine.
//!
//! `SessionController` owns every transition of the session lifecycle and
//! is the only writer of the token store. The state lives in a `watch`
//! channel; consumers subscribe instead of polling.
//!
//! Invariant: the state is `Authenticated` if and only if the token store
//! holds a credential. Any observed mismatch (a 401 on a data call while
//! `Authenticated`) is corrected through [`SessionController::force_logout`].

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;

use crate::api::AuthClient;
use crate::token::TokenStore;

/// Session lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No credential and no attempt in flight.
    Idle,
    /// A login or register sequence is in flight.
    Loading,
    /// A credential is persisted and presumed valid.
    Authenticated,
    /// The last attempt failed; dismissible.
    Error(String),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

/// State machine orchestrating [`AuthClient`] and [`TokenStore`].
pub struct SessionController {
    auth: AuthClient,
    tokens: Arc<TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionController {
    /// Creates a controller, deriving the initial state from the token store.
    pub fn new(auth: AuthClient, tokens: Arc<TokenStore>) -> Self {
        let initial = if tokens.get().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Idle
        };
        Self {
            auth,
            tokens,
            state: watch::Sender::new(initial),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Change notification stream for the session state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Attempts a login with the given credentials.
    ///
    /// Rejected as a no-op if another login/register sequence is in flight;
    /// interleaving two attempts could produce two concurrent token writes.
    /// Starting from `Authenticated` clears the stored credential first, so
    /// a failed re-login cannot leave the old token behind an error state.
    pub async fn login(&self, email: &str, password: &str) {
        if !self.enter_loading() {
            return;
        }
        self.run_login(email, password).await;
    }

    /// Registers a new account, then chains a login with the same
    /// credentials. A registration failure short-circuits: the chained
    /// login is never attempted.
    pub async fn register(&self, username: &str, email: &str, password: &str) {
        if !self.enter_loading() {
            return;
        }
        match self.auth.register(username, email, password).await {
            Ok(()) => self.run_login(email, password).await,
            Err(err) => {
                tracing::debug!(error = %err, "registration failed");
                self.state.send_replace(SessionState::Error(err.to_string()));
            }
        }
    }

    /// Clears the credential and returns to `Idle`.
    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        self.state.send_replace(SessionState::Idle);
        Ok(())
    }

    /// Dismisses an error state back to `Idle`. No-op in any other state.
    pub fn dismiss_error(&self) {
        self.state.send_if_modified(|s| {
            if matches!(s, SessionState::Error(_)) {
                *s = SessionState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Forced logout triggered by an `Unauthorized` response on any data
    /// call. Idempotent: repeated 401s while already logged out do nothing.
    pub fn force_logout(&self) {
        if !self.state().is_authenticated() {
            return;
        }
        tracing::warn!("unauthorized response, clearing session");
        if let Err(err) = self.tokens.clear() {
            tracing::error!(error = %err, "failed to clear persisted credential");
        }
        self.state.send_replace(SessionState::Idle);
    }

    /// Transitions into `Loading` unless an attempt is already in flight.
    ///
    /// Entering a new attempt invalidates whatever credential was stored;
    /// otherwise a failure would end in `Error` with the old token still
    /// present, and the state would no longer mirror the token store.
    fn enter_loading(&self) -> bool {
        let entered = self.state.send_if_modified(|s| {
            if matches!(s, SessionState::Loading) {
                false
            } else {
                *s = SessionState::Loading;
                true
            }
        });
        if !entered {
            tracing::warn!("auth attempt ignored: another is in flight");
            return false;
        }
        if self.tokens.get().is_some()
            && let Err(err) = self.tokens.clear()
        {
            tracing::error!(error = %err, "failed to clear previous credential");
            self.state.send_replace(SessionState::Error(err.to_string()));
            return false;
        }
        true
    }

    /// Shared tail of `login` and the register chain. Assumes `Loading`.
    async fn run_login(&self, email: &str, password: &str) {
        match self.auth.login(email, password).await {
            Ok(credential) => {
                if let Err(err) = self.tokens.set(credential) {
                    tracing::error!(error = %err, "failed to persist credential");
                    self.state.send_replace(SessionState::Error(err.to_string()));
                    return;
                }
                self.state.send_replace(SessionState::Authenticated);
            }
            Err(err) => {
                tracing::debug!(error = %err, "login failed");
                self.state.send_replace(SessionState::Error(err.to_string()));
            }
        }
    }
}
