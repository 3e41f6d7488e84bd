//! Trace events and trace parsing.

use super::error::ReplayError;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

/// Latest offset a trace event may carry: one day.
pub const MAX_TRACE_OFFSET_MS: u64 = 24 * 60 * 60 * 1000;

/// A page event, as recorded in a trace.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(
    tag = "event",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case"
)]
pub enum PageEvent {
    /// The window scrolled to `offset`.
    Scroll { offset: f64 },

    /// The pointer moved over the hero section.
    PointerMove {
        client_x: f64,
        client_y: f64,
        #[serde(default)]
        hero_left: f64,
        #[serde(default)]
        hero_top: f64,
    },

    /// The mobile menu button was clicked.
    MenuToggle,

    /// A link inside the mobile menu was clicked.
    MenuLinkClick,

    /// An in-page anchor was clicked; `target-top` is absent for dangling anchors.
    AnchorClick {
        #[serde(default)]
        target_top: Option<f64>,
    },

    /// An animated element's intersection with the viewport changed.
    ElementVisibility { id: String, ratio: f64 },

    /// The contact form was submitted.
    FormSubmit,

    /// The document finished parsing.
    DomContentLoaded,

    /// Every resource finished loading.
    Load,
}

impl PageEvent {
    /// Whether the event reaches the page through a throttled handler.
    #[must_use]
    pub fn is_high_frequency(&self) -> bool {
        matches!(self, Self::Scroll { .. } | Self::PointerMove { .. })
    }
}

/// A page event with its offset from the start of the trace.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TraceEvent {
    /// Milliseconds since the start of the trace.
    pub at_ms: u64,

    #[serde(flatten)]
    pub event: PageEvent,
}

/// Parses a JSON-lines trace. Blank lines are ignored.
///
/// # Errors
///
/// Returns [`ReplayError`] if reading fails, a line is not a valid event, an
/// offset exceeds [`MAX_TRACE_OFFSET_MS`], or events are not in time order.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<TraceEvent>, ReplayError> {
    let mut events: Vec<TraceEvent> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| ReplayError::IoError {
            path: format!("<line {line_number}>"),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let event: TraceEvent =
            serde_json::from_str(&line).map_err(|source| ReplayError::ParseError {
                line: line_number,
                source,
            })?;
        if event.at_ms > MAX_TRACE_OFFSET_MS {
            return Err(ReplayError::OffsetTooLarge {
                line: line_number,
                at_ms: event.at_ms,
                max_ms: MAX_TRACE_OFFSET_MS,
            });
        }
        if let Some(previous) = events.last() {
            if event.at_ms < previous.at_ms {
                return Err(ReplayError::OutOfOrder {
                    line: line_number,
                    at_ms: event.at_ms,
                    previous_ms: previous.at_ms,
                });
            }
        }
        events.push(event);
    }

    Ok(events)
}

/// Loads a trace from a file.
///
/// # Errors
///
/// Returns [`ReplayError::IoError`] if the file cannot be opened, or any
/// error from [`parse_trace`].
pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>, ReplayError> {
    let file = std::fs::File::open(path).map_err(|source| ReplayError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let events = parse_trace(std::io::BufReader::new(file))?;
    debug!(path = %path.display(), count = events.len(), "Trace loaded");
    Ok(events)
}
