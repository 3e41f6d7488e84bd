//! Throttle error types.

use thiserror::Error;

/// Errors raised while wrapping an action.
///
/// Calling a wrapped action never fails; every error is reported at wrap time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThrottleError {
    /// The window could not be turned into a usable duration.
    #[error("Invalid throttle window '{value}': {reason}")]
    InvalidConfiguration {
        /// The rejected input, as given.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// No tokio runtime was available to host deferred invocations.
    #[error("Throttle must be created inside a tokio runtime")]
    MissingRuntime,
}
