//! Driven port that carries API requests to the backend.
//!
//! The domain owns the request and response shapes so the API client and
//! interceptor stay independent of the HTTP library in use.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::ClientError;

/// HTTP status the backend uses for authentication failures.
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// Request methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// One request to the backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Path beginning with `/`.
    pub path: String,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `GET` request without query parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `POST` request carrying a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Append one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Raw backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response with a JSON body.
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body)
            .map_err(|error| ClientError::decode(format!("invalid JSON payload: {error}")))
    }

    /// Whitespace-compacted, length-limited preview of the body for logs
    /// and error messages.
    pub fn body_preview(&self) -> String {
        const PREVIEW_CHAR_LIMIT: usize = 160;

        let compact = String::from_utf8_lossy(&self.body)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
        if compact.chars().count() > PREVIEW_CHAR_LIMIT {
            format!("{preview}...")
        } else {
            preview
        }
    }
}

/// Port for issuing requests to the backend API.
///
/// Adapters return any response the backend produced, whatever its status;
/// only failures to obtain a response are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send one request and return the backend's response.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError>;
}
