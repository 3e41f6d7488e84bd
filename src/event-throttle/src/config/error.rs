//! Configuration error types.

use crate::throttle::ThrottleError;
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is unusable.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// An environment override could not be used.
    #[error("Invalid value in environment variable {var}: {source}")]
    Environment {
        var: &'static str,
        #[source]
        source: ThrottleError,
    },

    /// The configured throttle window is invalid.
    #[error(transparent)]
    Throttle(#[from] ThrottleError),
}
