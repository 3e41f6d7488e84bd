//! Replay error types.

use crate::config::ConfigError;
use crate::throttle::ThrottleError;
use thiserror::Error;

/// Errors that can occur while loading or replaying a trace.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Failed to read the trace file.
    #[error("Failed to read trace '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A trace line is not a valid event.
    #[error("Invalid event on trace line {line}: {source}")]
    ParseError {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Events must be recorded in time order.
    #[error("Trace line {line} at {at_ms}ms precedes the previous event at {previous_ms}ms")]
    OutOfOrder {
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },

    /// An event lies too far after the start of the trace to be replayed.
    #[error("Trace line {line} at {at_ms}ms exceeds the maximum offset of {max_ms}ms")]
    OffsetTooLarge { line: usize, at_ms: u64, max_ms: u64 },

    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A throttled handler could not be created.
    #[error(transparent)]
    Throttle(#[from] ThrottleError),
}
