//! Authenticated list/item CRUD calls.

use std::sync::Arc;

use anyhow::Result;
use tempo_types::{CreateListRequest, TodoList, TodoListWithItems};

use crate::api::error::{ApiError, ApiErrorKind, ApiResult};
use crate::config::Config;
use crate::token::TokenStore;

/// Client for the `/lists` endpoints.
///
/// The bearer header is built from the token store's *current* value on
/// every call, never from a copy captured earlier, so a logout racing an
/// in-flight call cannot resurrect a stale credential.
pub struct TodoApi {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<TokenStore>,
}

impl TodoApi {
    pub fn new(config: &Config, tokens: Arc<TokenStore>) -> Result<Self> {
        Ok(Self {
            base_url: config.validated_base_url()?,
            http: super::build_http(config.timeout_secs)?,
            tokens,
        })
    }

    /// `GET /lists`.
    pub async fn list_all(&self) -> ApiResult<Vec<TodoList>> {
        let url = format!("{}/lists", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.bearer()?)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        Self::parse_json(response).await
    }

    /// `GET /lists/{id}`.
    pub async fn list_with_items(&self, id: i64) -> ApiResult<TodoListWithItems> {
        let url = format!("{}/lists/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.bearer()?)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        Self::parse_json(response).await
    }

    /// `POST /lists`.
    pub async fn create_list(&self, title: &str) -> ApiResult<TodoList> {
        let url = format!("{}/lists", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer()?)
            .json(&CreateListRequest {
                title: title.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        Self::parse_json(response).await
    }

    /// Reads the current token at call time. A missing token classifies as
    /// `Unauthorized` without touching the network.
    fn bearer(&self) -> ApiResult<String> {
        self.tokens
            .get()
            .map(|token| format!("Bearer {}", token.expose()))
            .ok_or_else(|| ApiError::new(ApiErrorKind::Unauthorized, "No credential available"))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::parse(e.to_string()))
    }
}
