//! Per-action throttle bookkeeping.

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A deferred invocation waiting for the end of the current window.
pub(super) struct Pending<C, A> {
    /// Identifies the timer task that owns this slot.
    pub(super) id: u64,
    /// Context and arguments of the most recent call inside the window.
    pub(super) invocation: (C, A),
    /// When the timer task will fire.
    pub(super) fires_at: Instant,
    /// Timer task handle, aborted when an immediate execution supersedes it.
    pub(super) handle: JoinHandle<()>,
}

/// Mutable state owned by one throttled action.
pub(super) struct ThrottleState<C, A> {
    /// When the action last ran. `None` until the first execution.
    pub(super) last_run_at: Option<Instant>,
    /// The single deferred slot.
    pub(super) pending: Option<Pending<C, A>>,
    /// Source of ids for timer tasks.
    pub(super) next_id: u64,
}

impl<C, A> ThrottleState<C, A> {
    pub(super) fn new() -> Self {
        Self {
            last_run_at: None,
            pending: None,
            next_id: 0,
        }
    }

    /// Takes the pending invocation if it still belongs to timer `id`.
    ///
    /// Records the execution time when it does.
    pub(super) fn claim_pending(&mut self, id: u64, now: Instant) -> Option<(C, A)> {
        if self.pending.as_ref().map(|pending| pending.id) != Some(id) {
            return None;
        }
        let pending = self.pending.take()?;
        self.last_run_at = Some(now);
        Some(pending.invocation)
    }

    pub(super) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}
