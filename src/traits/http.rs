//! HTTP client seam used by the bridge adapter.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::error::AdapterError;

/// Status and body of an HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timeout: {0}")]
    Timeout(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Other(String),
}

impl From<HttpError> for AdapterError {
    fn from(err: HttpError) -> Self {
        AdapterError::Transport(err.to_string())
    }
}

/// Minimal async HTTP client.
///
/// Production code uses [`ReqwestHttpClient`](crate::adapters::ReqwestHttpClient);
/// tests use [`MockHttpClient`](crate::adapters::mock::MockHttpClient).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<Response, HttpError>;

    /// POST a JSON body (may be empty).
    async fn post(&self, url: &str, body: &str) -> Result<Response, HttpError>;
}
