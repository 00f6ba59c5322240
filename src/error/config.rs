//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}
