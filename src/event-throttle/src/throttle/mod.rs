//! Leading+trailing throttling of actions.
//!
//! A [`Throttled`] action runs at most once per [`ThrottleWindow`]. The first
//! call after a quiet period runs immediately. Calls landing inside the window
//! collapse into a single deferred invocation that fires when the window
//! closes, carrying the context and arguments of the most recent call.
//!
//! A call arriving while a deferred invocation is already scheduled only
//! replaces the captured context and arguments; it never pushes the firing
//! time back.

mod error;
mod state;
mod window;

pub use error::ThrottleError;
pub use window::{ThrottleWindow, MAX_WINDOW_MS};

use state::{Pending, ThrottleState};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::trace;

/// Wraps `action` so that it executes at most once per `window`.
///
/// # Errors
///
/// Returns [`ThrottleError::InvalidConfiguration`] if `window` is not a valid
/// window, or [`ThrottleError::MissingRuntime`] when called outside a tokio
/// runtime.
pub fn throttle<C, A, F, W>(action: F, window: W) -> Result<Throttled<C, A>, ThrottleError>
where
    C: Send + 'static,
    A: Send + 'static,
    F: Fn(C, A) + Send + Sync + 'static,
    W: TryInto<ThrottleWindow>,
    ThrottleError: From<W::Error>,
{
    let window = window.try_into().map_err(ThrottleError::from)?;
    Throttled::new(action, window)
}

impl From<std::convert::Infallible> for ThrottleError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// An action wrapped by [`throttle`].
///
/// Clones share the same window and state.
pub struct Throttled<C, A> {
    inner: Arc<Inner<C, A>>,
}

struct Inner<C, A> {
    action: Box<dyn Fn(C, A) + Send + Sync>,
    window: ThrottleWindow,
    state: Mutex<ThrottleState<C, A>>,
    runtime: Handle,
}

impl<C, A> Inner<C, A> {
    fn lock(&self) -> MutexGuard<'_, ThrottleState<C, A>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C, A> Throttled<C, A>
where
    C: Send + 'static,
    A: Send + 'static,
{
    /// Wraps `action`, hosting deferred invocations on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ThrottleError::MissingRuntime`] outside a tokio runtime.
    pub fn new<F>(action: F, window: ThrottleWindow) -> Result<Self, ThrottleError>
    where
        F: Fn(C, A) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| ThrottleError::MissingRuntime)?;
        Ok(Self::with_runtime(action, window, runtime))
    }

    /// Wraps `action`, hosting deferred invocations on `runtime`.
    pub fn with_runtime<F>(action: F, window: ThrottleWindow, runtime: Handle) -> Self
    where
        F: Fn(C, A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                action: Box::new(action),
                window,
                state: Mutex::new(ThrottleState::new()),
                runtime,
            }),
        }
    }

    /// Requests an execution of the action.
    ///
    /// Runs the action synchronously when the window since the last execution
    /// has elapsed. Otherwise stores `context` and `args` in the deferred slot,
    /// scheduling it for the end of the window if it was empty. Always returns
    /// without waiting.
    pub fn call(&self, context: C, args: A) {
        let now = Instant::now();
        let window = self.inner.window.as_duration();
        let mut state = self.inner.lock();

        let deadline = match state.last_run_at {
            Some(last) if now.saturating_duration_since(last) < window => last + window,
            _ => {
                let superseded = state.pending.take();
                state.last_run_at = Some(now);
                drop(state);

                if let Some(pending) = superseded {
                    pending.handle.abort();
                    trace!(id = pending.id, "Deferred invocation superseded");
                }
                (self.inner.action)(context, args);
                return;
            }
        };

        if let Some(pending) = state.pending.as_mut() {
            let replaced = std::mem::replace(&mut pending.invocation, (context, args));
            drop(state);
            drop(replaced);
            return;
        }

        let id = state.allocate_id();
        let handle = self
            .inner
            .runtime
            .spawn(fire_deferred(Arc::clone(&self.inner), id, deadline));
        state.pending = Some(Pending {
            id,
            invocation: (context, args),
            fires_at: deadline,
            handle,
        });
        trace!(
            id,
            delay_ms = deadline.saturating_duration_since(now).as_millis() as u64,
            "Deferred invocation scheduled"
        );
    }
}

impl<A> Throttled<(), A>
where
    A: Send + 'static,
{
    /// Requests an execution of an action that takes no context.
    pub fn invoke(&self, args: A) {
        self.call((), args);
    }
}

impl<C, A> Throttled<C, A> {
    /// Returns the configured window.
    #[must_use]
    pub fn window(&self) -> ThrottleWindow {
        self.inner.window
    }

    /// Returns when the action last executed, if it ever did.
    #[must_use]
    pub fn last_run_at(&self) -> Option<Instant> {
        self.inner.lock().last_run_at
    }

    /// Returns when the deferred invocation will fire, if one is scheduled.
    #[must_use]
    pub fn pending_fires_at(&self) -> Option<Instant> {
        self.inner.lock().pending.as_ref().map(|pending| pending.fires_at)
    }

    /// Returns true while a deferred invocation is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }
}

impl<C, A> Clone for Throttled<C, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, A> fmt::Debug for Throttled<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("Throttled")
            .field("window", &self.inner.window)
            .field("last_run_at", &state.last_run_at)
            .field("pending", &state.pending.is_some())
            .finish()
    }
}

/// Timer task body for a deferred invocation.
///
/// Holds the shared state alive, so a scheduled invocation still fires after
/// every [`Throttled`] handle has been dropped.
async fn fire_deferred<C, A>(inner: Arc<Inner<C, A>>, id: u64, fires_at: Instant) {
    tokio::time::sleep_until(fires_at).await;

    let claimed = inner.lock().claim_pending(id, Instant::now());
    if let Some((context, args)) = claimed {
        trace!(id, "Deferred invocation fired");
        (inner.action)(context, args);
    }
}
