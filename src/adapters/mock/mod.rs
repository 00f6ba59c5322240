//! Test doubles.
//!
//! - [`MockAdapter`] - scriptable media adapter
//! - [`MockHttpClient`] - URL-keyed canned HTTP responses

pub mod adapter;
pub mod http;

pub use adapter::MockAdapter;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
