//! CallTracker: the state machine around one wrapped operation.
//!
//! Each tracker owns a `watch` channel holding its [`CallState`]. Every
//! transition is a single `send_modify`/`send_if_modified`, so a transition is
//! applied under the channel's write lock and observers never see it half done.

use std::marker::PhantomData;

use tokio::sync::watch;

use crate::operation::Operation;
use crate::state::{CallPhase, CallState};

/// Tracks the lifecycle of invocations of one [`Operation`].
///
/// Transitions:
/// - `Idle | Succeeded | Failed` → `Loading` on [`call`](Self::call)
/// - `Loading` → `Succeeded` when the operation resolves
/// - `Loading` → `Failed` when the operation rejects
///
/// The tracker is reusable indefinitely. Overlapping `call`s are not
/// prevented; the last one to settle decides `data`/`error`.
pub struct CallTracker<O, P>
where
    O: Operation<P>,
    P: Send + 'static,
{
    /// The wrapped operation.
    operation: O,
    /// Current state; the sender side is only written by this tracker.
    state: watch::Sender<CallState<O::Output>>,
    _params: PhantomData<fn(P)>,
}

impl<O, P> CallTracker<O, P>
where
    O: Operation<P>,
    P: Send + 'static,
{
    /// Create an idle tracker around `operation`.
    pub fn new(operation: O) -> Self {
        let (state, _) = watch::channel(CallState::default());
        Self {
            operation,
            state,
            _params: PhantomData,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Invocation
    // ─────────────────────────────────────────────────────────────────────────

    /// Invoke the operation and track it.
    ///
    /// Sets `loading` and clears `error` before invoking; `data` from a
    /// previous success is kept until this call settles. On failure the
    /// error message is recorded and the original error is returned.
    pub async fn call(&self, params: P) -> Result<O::Output, O::Error> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        tracing::debug!("call started");

        self.run(params).await
    }

    /// Invoke the operation only if the tracker is pristine.
    ///
    /// Pristine means no data and no call in flight. The check and the move to
    /// `Loading` happen in one state transition, so concurrent callers start
    /// the operation at most once. Returns `None` when nothing was invoked.
    pub async fn call_if_pristine(&self, params: P) -> Option<Result<O::Output, O::Error>> {
        let started = self.state.send_if_modified(|state| {
            if state.is_pristine() {
                state.loading = true;
                state.error = None;
                true
            } else {
                false
            }
        });

        if !started {
            tracing::trace!("call skipped: tracker not pristine");
            return None;
        }
        tracing::debug!("call started (pristine)");

        Some(self.run(params).await)
    }

    /// Await the operation and apply its terminal transition.
    async fn run(&self, params: P) -> Result<O::Output, O::Error> {
        let mut in_flight = InFlight::new(&self.state);
        let result = self.operation.invoke(params).await;
        in_flight.settled = true;

        match result {
            Ok(value) => {
                let data = value.clone();
                self.state.send_modify(|state| {
                    state.data = Some(data);
                    state.error = None;
                    state.loading = false;
                });
                tracing::debug!("call succeeded");
                Ok(value)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::debug!(error = %message, "call failed");
                self.state.send_modify(|state| {
                    state.error = Some(message);
                    state.data = None;
                    state.loading = false;
                });
                Err(err)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resets
    // ─────────────────────────────────────────────────────────────────────────

    /// Clear `data`. `error` and `loading` are untouched.
    pub fn reset_data(&self) {
        self.state.send_if_modified(|state| state.data.take().is_some());
    }

    /// Clear `error`. `data` and `loading` are untouched.
    pub fn reset_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot of the current state.
    pub fn state(&self) -> CallState<O::Output> {
        self.state.borrow().clone()
    }

    /// Value of the last successful call, if any.
    pub fn data(&self) -> Option<O::Output> {
        self.state.borrow().data.clone()
    }

    /// Message of the last failed call, if any.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Whether a call is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// The phase the current state corresponds to.
    pub fn phase(&self) -> CallPhase {
        self.state.borrow().phase()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver starts with the current state marked as seen; resets of
    /// an already empty field do not notify.
    pub fn subscribe(&self) -> watch::Receiver<CallState<O::Output>> {
        self.state.subscribe()
    }

    /// The wrapped operation.
    pub fn operation(&self) -> &O {
        &self.operation
    }
}

/// Clears `loading` if a call future is dropped before it settles.
struct InFlight<'a, T> {
    state: &'a watch::Sender<CallState<T>>,
    settled: bool,
}

impl<'a, T> InFlight<'a, T> {
    fn new(state: &'a watch::Sender<CallState<T>>) -> Self {
        Self {
            state,
            settled: false,
        }
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("call dropped before settling");
            self.state
                .send_if_modified(|state| std::mem::replace(&mut state.loading, false));
        }
    }
}
