#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod page;
pub mod replay;
pub mod throttle;

pub use config::{ConfigError, Settings};
pub use page::{Page, PageConfig, PageSnapshot};
pub use replay::{
    load_trace, parse_trace, replay, replay_file, HandlerCounts, PageEvent, ReplayError,
    ReplaySummary, TraceEvent,
};
pub use throttle::{throttle, ThrottleError, ThrottleWindow, Throttled};
