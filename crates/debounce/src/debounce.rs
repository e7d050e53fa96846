//! Leading/trailing debouncing
//!
//! A [`Debouncer`] wraps an action and rate-limits it:
//! - The first call of a burst runs the action synchronously (leading edge)
//! - Calls arriving while the timer is pending only record their arguments
//! - When the window closes, one trailing run uses the latest arguments
//!
//! State machine per debouncer:
//!
//! ```text
//! Idle --call--> Armed --call--> RepeatPending
//!   ^              |                  |
//!   |        timer, no repeat    timer, repeat (trailing run)
//!   +--------------+------------------+
//! ```
//!
//! A timer that fires while the most recent call is younger than the window
//! re-arms for the remainder instead of firing early.

use crate::config::DebounceConfig;
use crate::error::DebounceError;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

type Action<A, R, E> = dyn Fn(A) -> Result<R, E> + Send + Sync;

const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Observable state of a debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No timer pending; the next call runs on the leading edge
    Idle,
    /// Leading run done, timer pending, no follow-up call yet
    Armed,
    /// Timer pending with a follow-up call waiting for the trailing edge
    RepeatPending,
}

struct State<A, R> {
    /// Outstanding timer task
    timer: Option<JoinHandle<()>>,
    /// Bumped whenever a timer is armed or cancelled; stale tasks bail out
    generation: u64,
    /// Arguments of the latest call not yet consumed
    latest_args: Option<A>,
    /// Arrival time of the latest call
    last_call: Instant,
    /// A call arrived while the timer was pending
    repeat_requested: bool,
    /// Value of the last successful run
    cached: Option<R>,
    /// Sequence number of the run that produced `cached`
    cached_seq: u64,
    next_seq: u64,
}

impl<A, R> State<A, R> {
    fn take_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Cache a result unless a newer run already did
    fn store(&mut self, seq: u64, value: R) {
        if seq > self.cached_seq {
            self.cached_seq = seq;
            self.cached = Some(value);
        }
    }
}

struct Inner<A, R, E> {
    action: Box<Action<A, R, E>>,
    window: Duration,
    label: Option<String>,
    handle: Handle,
    state: Mutex<State<A, R>>,
}

impl<A, R, E> Inner<A, R, E> {
    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("anonymous")
    }
}

impl<A, R, E: fmt::Display> Inner<A, R, E> {
    /// Timer expiry. Returns the new deadline when re-armed.
    fn fire(&self, generation: u64) -> Option<Instant> {
        let mut state = self.state.lock();
        if state.generation != generation {
            return None;
        }

        let elapsed = state.last_call.elapsed();
        if elapsed < self.window {
            trace!(
                "Debounce [{}]: call {:?} before deadline, re-arming",
                self.label(),
                self.window - elapsed
            );
            return Some(deadline_after(state.last_call, self.window));
        }

        state.timer = None;
        if !state.repeat_requested {
            trace!("Debounce [{}]: window closed without follow-up", self.label());
            return None;
        }
        state.repeat_requested = false;

        let args = state.latest_args.take()?;
        let seq = state.take_seq();
        drop(state);

        debug!("Debounce [{}]: trailing edge", self.label());
        match (self.action)(args) {
            Ok(value) => self.state.lock().store(seq, value),
            Err(e) => warn!("Debounced action [{}] failed on trailing edge: {}", self.label(), e),
        }
        None
    }
}

impl<A, R, E> Drop for Inner<A, R, E> {
    fn drop(&mut self) {
        if let Some(timer) = self.state.get_mut().timer.take() {
            timer.abort();
        }
    }
}

/// Debounced wrapper around an action
///
/// Clones share the same state and action.
pub struct Debouncer<A, R, E> {
    inner: Arc<Inner<A, R, E>>,
}

impl<A, R, E> Clone for Debouncer<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R, E> fmt::Debug for Debouncer<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("label", &self.inner.label)
            .field("window", &self.inner.window)
            .finish_non_exhaustive()
    }
}

/// Wrap `action` in a debouncer driven by the current tokio runtime
pub fn wrap<A, R, E, F>(action: F, window: Duration) -> Result<Debouncer<A, R, E>, DebounceError>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    E: fmt::Display + 'static,
    F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
{
    Debouncer::new(action, window)
}

impl<A, R, E> Debouncer<A, R, E>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    E: fmt::Display + 'static,
{
    /// Create a debouncer on the current tokio runtime
    ///
    /// Fails with [`DebounceError::NoRuntime`] outside a runtime.
    pub fn new<F>(action: F, window: Duration) -> Result<Self, DebounceError>
    where
        F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
        Ok(Self::build(handle, Box::new(action), window, None))
    }

    /// Create a debouncer whose timers run on `handle`
    pub fn with_handle<F>(handle: Handle, action: F, window: Duration) -> Self
    where
        F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    {
        Self::build(handle, Box::new(action), window, None)
    }

    /// Create a debouncer from validated configuration
    pub fn from_config<F>(action: F, config: &DebounceConfig) -> Result<Self, DebounceError>
    where
        F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    {
        config.validate()?;
        let handle = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
        Ok(Self::build(handle, Box::new(action), config.window(), config.label.clone()))
    }

    fn build(
        handle: Handle,
        action: Box<Action<A, R, E>>,
        window: Duration,
        label: Option<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                action,
                window,
                label,
                handle,
                state: Mutex::new(State {
                    timer: None,
                    generation: 0,
                    latest_args: None,
                    last_call: Instant::now(),
                    repeat_requested: false,
                    cached: None,
                    cached_seq: 0,
                    next_seq: 0,
                }),
            }),
        }
    }

    /// Submit a call
    ///
    /// On the leading edge the action runs before this returns and its
    /// result (or error) is handed back. Inside a burst the call only
    /// records `args` for the trailing run and returns the cached value of
    /// the last successful run (`None` if there was none).
    pub fn call(&self, args: A) -> Result<Option<R>, E> {
        let mut state = self.inner.state.lock();
        state.last_call = Instant::now();

        if state.timer.is_some() {
            state.latest_args = Some(args);
            state.repeat_requested = true;
            trace!("Debounce [{}]: call coalesced", self.inner.label());
            return Ok(state.cached.clone());
        }

        let deadline = deadline_after(state.last_call, self.inner.window);
        state.generation += 1;
        state.timer = Some(self.spawn_timer(deadline, state.generation));
        state.latest_args = None;
        state.repeat_requested = false;
        let seq = state.take_seq();
        drop(state);

        // Lock is released so the action may call back into this debouncer
        debug!("Debounce [{}]: leading edge", self.inner.label());
        let value = (self.inner.action)(args)?;
        self.inner.state.lock().store(seq, value.clone());
        Ok(Some(value))
    }

    fn spawn_timer(&self, deadline: Instant, generation: u64) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        self.inner.handle.spawn(run_timer(weak, deadline, generation))
    }
}

impl<A, R, E> Debouncer<A, R, E> {
    /// Drop any pending trailing run
    ///
    /// Returns true if a timer was pending. The next call fires on the
    /// leading edge again.
    pub fn cancel_pending(&self) -> bool {
        let mut state = self.inner.state.lock();
        state.latest_args = None;
        state.repeat_requested = false;
        state.generation += 1;
        match state.timer.take() {
            Some(timer) => {
                timer.abort();
                debug!("Debounce [{}]: pending run cancelled", self.inner.label());
                true
            }
            None => false,
        }
    }

    /// Current state machine position
    pub fn phase(&self) -> Phase {
        let state = self.inner.state.lock();
        match (state.timer.is_some(), state.repeat_requested) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::Armed,
            (true, true) => Phase::RepeatPending,
        }
    }

    /// Whether a timer is pending
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    /// Quiet window
    pub fn window(&self) -> Duration {
        self.inner.window
    }
}

impl<A, R: Clone, E> Debouncer<A, R, E> {
    /// Value of the last successful run
    pub fn cached(&self) -> Option<R> {
        self.inner.state.lock().cached.clone()
    }
}

/// `start + window`, clamped to roughly 30 years out for huge windows
fn deadline_after(start: Instant, window: Duration) -> Instant {
    start
        .checked_add(window)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// Timer task. Holds only a weak reference so dropping every
/// [`Debouncer`] handle abandons the trailing run.
async fn run_timer<A, R, E: fmt::Display>(
    weak: Weak<Inner<A, R, E>>,
    mut deadline: Instant,
    generation: u64,
) {
    loop {
        sleep_until(deadline).await;

        let Some(inner) = weak.upgrade() else {
            return;
        };
        match inner.fire(generation) {
            Some(next) => deadline = next,
            None => return,
        }
    }
}
