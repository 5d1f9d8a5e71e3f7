//! Classified failures at the API boundary.
//!
//! Raw transport errors never escape this layer: every failure is sorted
//! into a kind before the session controller or the todo store sees it.
//! `Unauthorized` is the one kind with a non-local effect (forced logout).

use std::fmt;

use tempo_types::ErrorResponse;

/// Categories of API failures for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP 401 from any endpoint. Triggers the forced-logout side effect.
    Unauthorized,
    /// Client-side validation failure; the request never reached the network.
    Validation,
    /// Non-401 HTTP status error (4xx, 5xx). Recoverable by retry.
    HttpStatus,
    /// Transport failure (connect error, timeout).
    Network,
    /// Failed to parse a response body.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::Validation => write!(f, "validation"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured API error with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category.
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// Optional additional details (e.g., raw error body).
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a client-side validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    /// Classifies a non-success HTTP status.
    ///
    /// 401 maps to `Unauthorized`; everything else is `HttpStatus`. The
    /// server's `{"message": ...}` body is surfaced when present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::HttpStatus
        };

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(body)
            && !err.message.trim().is_empty()
        {
            return Self {
                kind,
                message: err.message,
                details: Some(body.to_string()),
            };
        }

        Self {
            kind,
            message: format!("HTTP {status}"),
            details: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
        }
    }

    /// Creates a transport error.
    pub fn network(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else {
            "Network error".to_string()
        };
        Self {
            kind: ApiErrorKind::Network,
            message,
            details: Some(err.to_string()),
        }
    }

    /// Creates a malformed-response error.
    pub fn parse(detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: "Malformed server response".to_string(),
            details: Some(detail.into()),
        }
    }

    /// Returns true if this failure must trigger the forced-logout path.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API boundary operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_classifies_as_unauthorized() {
        let err = ApiError::http_status(401, r#"{"message":"token expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.message, "token expired");
    }

    #[test]
    fn test_500_classifies_as_http_status() {
        let err = ApiError::http_status(500, "internal error");
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details.as_deref(), Some("internal error"));
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let err = ApiError::http_status(409, r#"{"message":"email already registered"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.to_string(), "email already registered");
    }

    #[test]
    fn test_validation_is_classified_without_details() {
        let err = ApiError::validation("Title cannot be empty");
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.to_string(), "Title cannot be empty");
        assert!(err.details.is_none());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_empty_body_falls_back_to_status_line() {
        let err = ApiError::http_status(503, "");
        assert_eq!(err.message, "HTTP 503");
        assert!(err.details.is_none());
    }
}
