//! Registration and login calls.

use anyhow::Result;
use tempo_types::{LoginRequest, LoginResponse, RegisterRequest};

use crate::api::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::token::Credential;

/// Stateless client for the `/users` endpoints.
///
/// Holds no session state; success of `login` yields a credential that the
/// session controller is responsible for persisting.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            base_url: config.validated_base_url()?,
            http: super::build_http(config.timeout_secs)?,
        })
    }

    /// `POST /users/register`. Success carries no body.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<()> {
        let url = format!("{}/users/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }
        tracing::debug!(email, "registration accepted");
        Ok(())
    }

    /// `POST /users/login`. Returns the bearer credential on success.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Credential> {
        let url = format!("{}/users/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::parse(e.to_string()))?;
        if body.token.is_empty() {
            return Err(ApiError::parse("login response contained an empty token"));
        }
        tracing::debug!(email, "login succeeded");
        Ok(Credential::new(body.token))
    }
}
