//! Network boundary for the Tempo API.
//!
//! `AuthClient` and `TodoApi` are stateless over the wire: they hold a base
//! URL and a `reqwest::Client` and classify every response into an
//! [`ApiError`] before it reaches the session controller or the todo store.

pub mod auth;
pub mod error;
pub mod todos;

pub use auth::AuthClient;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use todos::TodoApi;

/// Standard User-Agent header for Tempo API requests.
pub const USER_AGENT: &str = concat!("tempo/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client from config.
pub(crate) fn build_http(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    use anyhow::Context;

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}
