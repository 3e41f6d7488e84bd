//! Replays recorded page events through throttled handlers.
//!
//! Scroll and pointer events reach the [`Page`] through [`Throttled`]
//! handlers sharing the configured window; every other event is applied as
//! it arrives. Events are delivered at their recorded offsets, so under a
//! paused tokio clock a replay is instant and deterministic.

mod error;
mod event;
mod summary;

pub use error::ReplayError;
pub use event::{load_trace, parse_trace, PageEvent, TraceEvent, MAX_TRACE_OFFSET_MS};
pub use summary::{HandlerCounts, ReplaySummary};

use crate::config::Settings;
use crate::page::Page;
use crate::throttle::throttle;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Pointer position over the hero section: client x/y, hero left/top.
type PointerArgs = (f64, f64, f64, f64);

/// State shared between the replay loop and the throttled handlers.
struct Shared {
    page: Page,
    scroll: HandlerCounts,
    pointer: HandlerCounts,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replays `events` against a fresh page built from `settings`.
///
/// Waits for trailing handler executions before returning.
///
/// # Errors
///
/// Returns [`ReplayError::Throttle`] if the handlers cannot be created.
pub async fn replay(
    events: &[TraceEvent],
    settings: &Settings,
) -> Result<ReplaySummary, ReplayError> {
    let shared = Arc::new(Mutex::new(Shared {
        page: Page::new(settings.page.clone()),
        scroll: HandlerCounts::default(),
        pointer: HandlerCounts::default(),
    }));

    let scroll_shared = Arc::clone(&shared);
    let on_scroll = throttle(
        move |(), offset: f64| {
            let mut state = lock(&scroll_shared);
            state.scroll.applied += 1;
            state.page.scroll(offset);
        },
        settings.window,
    )?;

    let pointer_shared = Arc::clone(&shared);
    let on_pointer = throttle(
        move |(), (client_x, client_y, hero_left, hero_top): PointerArgs| {
            let mut state = lock(&pointer_shared);
            state.pointer.applied += 1;
            state.page.move_pointer(client_x, client_y, hero_left, hero_top);
        },
        settings.window,
    )?;

    info!(events = events.len(), window = %settings.window, "Replaying trace");
    if settings.window.is_zero() {
        debug!("Zero window, scroll and pointer handlers run unthrottled");
    }
    let start = Instant::now();
    let mut direct = 0;

    for traced in events {
        tokio::time::sleep_until(start + Duration::from_millis(traced.at_ms)).await;

        match &traced.event {
            PageEvent::Scroll { offset } => {
                lock(&shared).scroll.received += 1;
                on_scroll.invoke(*offset);
            }
            PageEvent::PointerMove {
                client_x,
                client_y,
                hero_left,
                hero_top,
            } => {
                let mut state = lock(&shared);
                state.pointer.received += 1;
                // Coarse pointers never get the listener.
                if state.page.config().fine_pointer {
                    drop(state);
                    on_pointer.invoke((*client_x, *client_y, *hero_left, *hero_top));
                }
            }
            other => {
                direct += 1;
                apply_direct(&mut lock(&shared).page, other);
            }
        }
    }

    while on_scroll.is_pending() || on_pointer.is_pending() {
        settle(&[on_scroll.pending_fires_at(), on_pointer.pending_fires_at()]).await;
    }

    let state = lock(&shared);
    let summary = ReplaySummary {
        events: events.len(),
        window_ms: settings.window.as_millis(),
        trace_span_ms: events.last().map_or(0, |last| last.at_ms),
        scroll: state.scroll,
        pointer: state.pointer,
        direct,
        page: state.page.snapshot(),
    };
    info!(
        scroll_received = summary.scroll.received,
        scroll_applied = summary.scroll.applied,
        pointer_received = summary.pointer.received,
        pointer_applied = summary.pointer.applied,
        "Replay finished"
    );
    Ok(summary)
}

/// Loads a trace file and replays it.
///
/// # Errors
///
/// Returns [`ReplayError`] if the trace cannot be loaded or replayed.
pub async fn replay_file(path: &Path, settings: &Settings) -> Result<ReplaySummary, ReplayError> {
    let events = load_trace(path)?;
    replay(&events, settings).await
}

/// Applies an event that bypasses throttling.
fn apply_direct(page: &mut Page, event: &PageEvent) {
    match event {
        PageEvent::MenuToggle => {
            let open = page.toggle_menu();
            debug!(open, "Mobile menu toggled");
        }
        PageEvent::MenuLinkClick => page.click_menu_link(),
        PageEvent::AnchorClick { target_top } => {
            if let Some(destination) = page.click_anchor(*target_top) {
                debug!(destination, "Scrolled to anchor");
            }
        }
        PageEvent::ElementVisibility { id, ratio } => {
            if page.observe_element(id, *ratio) {
                debug!(id = id.as_str(), "Element revealed");
            }
        }
        PageEvent::FormSubmit => {
            if !page.submit_form() {
                debug!("Form already sending, submit ignored");
            }
        }
        PageEvent::DomContentLoaded => page.dom_content_loaded(),
        PageEvent::Load => page.load(),
        PageEvent::Scroll { .. } | PageEvent::PointerMove { .. } => {}
    }
}

/// Waits past the latest scheduled deferred invocation, then yields so its
/// timer task can run.
async fn settle(fires_at: &[Option<Instant>]) {
    if let Some(latest) = fires_at.iter().flatten().max() {
        tokio::time::sleep_until(*latest).await;
    }
    tokio::task::yield_now().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throttle::ThrottleWindow;

    fn settings(window_ms: u64) -> Settings {
        Settings {
            window: ThrottleWindow::from_millis(window_ms).unwrap(),
            ..Settings::default()
        }
    }

    fn scroll(at_ms: u64, offset: f64) -> TraceEvent {
        TraceEvent {
            at_ms,
            event: PageEvent::Scroll { offset },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_scrolls_keeps_leading_and_trailing() {
        let events = vec![
            scroll(0, 10.0),
            scroll(10, 20.0),
            scroll(20, 30.0),
            scroll(30, 90.0),
        ];

        let summary = replay(&events, &settings(100)).await.unwrap();

        assert_eq!(summary.scroll.received, 4);
        assert_eq!(summary.scroll.applied, 2);
        assert_eq!(summary.page.scroll_offset, 90.0);
        assert!(summary.page.nav_scrolled);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_window_applies_every_scroll() {
        let events = vec![scroll(0, 10.0), scroll(1, 60.0), scroll(2, 20.0)];

        let summary = replay(&events, &settings(0)).await.unwrap();

        assert_eq!(summary.scroll.applied, 3);
        assert_eq!(summary.scroll.collapsed(), 0);
        assert!(!summary.page.nav_scrolled);
    }

    #[tokio::test(start_paused = true)]
    async fn coarse_pointer_moves_are_ignored() {
        let mut settings = settings(50);
        settings.page.fine_pointer = false;
        let events = vec![TraceEvent {
            at_ms: 0,
            event: PageEvent::PointerMove {
                client_x: 5.0,
                client_y: 5.0,
                hero_left: 0.0,
                hero_top: 0.0,
            },
        }];

        let summary = replay(&events, &settings).await.unwrap();

        assert_eq!(summary.pointer.received, 1);
        assert_eq!(summary.pointer.applied, 0);
        assert_eq!(summary.page.glow, None);
    }

    #[tokio::test(start_paused = true)]
    async fn direct_events_are_counted() {
        let events = vec![
            TraceEvent {
                at_ms: 0,
                event: PageEvent::DomContentLoaded,
            },
            TraceEvent {
                at_ms: 0,
                event: PageEvent::MenuToggle,
            },
            TraceEvent {
                at_ms: 3,
                event: PageEvent::FormSubmit,
            },
        ];

        let summary = replay(&events, &settings(100)).await.unwrap();

        assert_eq!(summary.direct, 3);
        assert_eq!(summary.trace_span_ms, 3);
        assert!(summary.page.menu_open);
        assert!(summary.page.submit_disabled);
        assert!(summary.page.body_loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_trace_produces_resting_page() {
        let summary = replay(&[], &settings(100)).await.unwrap();
        assert_eq!(summary.events, 0);
        assert_eq!(summary.trace_span_ms, 0);
        assert_eq!(summary.page, Page::default().snapshot());
    }
}
