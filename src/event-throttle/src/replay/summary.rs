//! Replay summary types.

use crate::page::PageSnapshot;
use serde::Serialize;

/// Call counts of one throttled handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HandlerCounts {
    /// Events delivered to the handler.
    pub received: usize,
    /// Times the handler actually ran.
    pub applied: usize,
}

impl HandlerCounts {
    /// Events that were collapsed into another execution.
    #[must_use]
    pub fn collapsed(&self) -> usize {
        self.received.saturating_sub(self.applied)
    }
}

/// Summary of a complete replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReplaySummary {
    /// Number of events in the trace.
    pub events: usize,

    /// Window applied to the scroll and pointer handlers, in milliseconds.
    pub window_ms: u64,

    /// Time covered by the trace, in milliseconds.
    pub trace_span_ms: u64,

    /// Scroll handler counts.
    pub scroll: HandlerCounts,

    /// Pointer handler counts.
    pub pointer: HandlerCounts,

    /// Events applied without throttling.
    pub direct: usize,

    /// Page state after the replay settled.
    pub page: PageSnapshot,
}
