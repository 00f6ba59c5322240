//! Trait seams for dependency injection.
//!
//! - [`MediaAdapter`] - the WebRTC media adapter the panel observes
//! - [`Roster`] - peer id to display name
//! - [`HttpClient`] - HTTP transport of the bridge adapter

pub mod adapter;
pub mod http;
pub mod roster;

pub use adapter::{MediaAdapter, StatsTarget};
pub use http::{HttpClient, HttpError, Response};
pub use roster::{Roster, SharedRoster};
