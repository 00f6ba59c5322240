//! The single handled failure kind of the poller.

use thiserror::Error;

use super::adapter::AdapterError;

/// A poll cycle could not assemble its snapshot.
///
/// The cycle is dropped as a whole; nothing partial is ever published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("poll cycle failed while fetching {stage}: {source}")]
pub struct PollError {
    /// What the cycle was fetching when it failed
    pub stage: String,
    #[source]
    pub source: AdapterError,
}

impl PollError {
    pub fn new(stage: impl Into<String>, source: AdapterError) -> Self {
        Self {
            stage: stage.into(),
            source,
        }
    }
}

/// Attach the fetch stage to adapter errors.
pub trait PollStage<T> {
    fn stage(self, stage: &str) -> Result<T, PollError>;
}

impl<T> PollStage<T> for Result<T, AdapterError> {
    fn stage(self, stage: &str) -> Result<T, PollError> {
        self.map_err(|source| PollError::new(stage, source))
    }
}
