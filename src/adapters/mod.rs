//! Concrete implementations of the trait seams in [`crate::traits`].
//!
//! - [`ReqwestHttpClient`] - production HTTP client
//! - [`HttpMediaAdapter`] - media adapter reached over an HTTP bridge
//! - [`SimulatedAdapter`] - synthetic adapter for demo runs
//! - [`mock`] - test doubles

pub mod bridge;
pub mod mock;
pub mod reqwest_http;
pub mod simulated;

pub use bridge::HttpMediaAdapter;
pub use reqwest_http::ReqwestHttpClient;
pub use simulated::SimulatedAdapter;
