//! Error types.
//!
//! | Type | Raised by | Handling |
//! |------|-----------|----------|
//! | [`AdapterError`] | media adapter calls | propagated with `?` |
//! | [`PollError`] | a poll cycle | logged, cycle skipped |
//! | [`ConfigError`] | config parsing | reported before the TUI starts |

mod adapter;
mod config;
mod poll;

pub use adapter::AdapterError;
pub use config::ConfigError;
pub use poll::{PollError, PollStage};

/// Result of a media adapter call.
pub type AdapterResult<T> = Result<T, AdapterError>;
