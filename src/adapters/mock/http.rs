//! Mock HTTP client for bridge adapter tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{HttpClient, HttpError, Response};

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

/// Canned answer for a URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        MockResponse::Success(Response::new(200, value.to_string()))
    }

    /// Response with a status and a text body.
    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, body.to_string()))
    }
}

#[derive(Default)]
struct MockHttpState {
    responses: HashMap<String, MockResponse>,
    requests: Vec<RecordedRequest>,
}

/// HTTP client answering from a URL → response table.
///
/// URLs are matched exactly; unknown URLs fail with [`HttpError::Other`].
#[derive(Clone, Default)]
pub struct MockHttpClient {
    inner: Arc<Mutex<MockHttpState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockHttpState> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Answer requests to `url` with `response`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.lock().responses.insert(url.to_string(), response);
    }

    /// Requests made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    fn answer(&self, method: &str, url: &str, body: Option<&str>) -> Result<Response, HttpError> {
        let mut inner = self.lock();
        inner.requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            body: body.map(str::to_string),
        });
        match inner.responses.get(url) {
            Some(MockResponse::Success(response)) => Ok(response.clone()),
            Some(MockResponse::Error(err)) => Err(err.clone()),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.answer("GET", url, None)
    }

    async fn post(&self, url: &str, body: &str) -> Result<Response, HttpError> {
        self.answer("POST", url, Some(body))
    }
}
