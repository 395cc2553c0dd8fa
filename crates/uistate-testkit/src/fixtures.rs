//! Test fixtures and helpers.
//!
//! Common setup code for tracker and storage tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{watch, Semaphore};

use uistate_fetch::Operation;
use uistate_storage::{MemoryBackend, Result, StorageBackend, StorageError};

/// Error produced by a scripted rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError(pub String);

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ScriptError {}

/// An operation that plays back queued outcomes.
///
/// Clones share the script, so a test can keep one handle while a tracker
/// owns another. When gated, each invocation waits for [`release`](Self::release)
/// before settling, which lets a test observe the tracker mid-call.
#[derive(Clone)]
pub struct ScriptedOperation<T> {
    inner: Arc<ScriptInner<T>>,
}

struct ScriptInner<T> {
    outcomes: Mutex<VecDeque<std::result::Result<T, ScriptError>>>,
    /// Number of invocations started so far.
    invocations: watch::Sender<usize>,
    /// `None` when ungated.
    gate: Option<Semaphore>,
}

impl<T> ScriptedOperation<T> {
    /// An operation that settles as soon as it is invoked.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// An operation that settles only when released.
    pub fn gated() -> Self {
        Self::build(Some(Semaphore::new(0)))
    }

    fn build(gate: Option<Semaphore>) -> Self {
        let (invocations, _) = watch::channel(0);
        Self {
            inner: Arc::new(ScriptInner {
                outcomes: Mutex::new(VecDeque::new()),
                invocations,
                gate,
            }),
        }
    }

    /// Queue a successful outcome.
    pub fn resolve(&self, value: impl Into<T>) {
        self.push(Ok(value.into()));
    }

    /// Queue a failure with `message`.
    pub fn reject(&self, message: impl Into<String>) {
        self.push(Err(ScriptError(message.into())));
    }

    fn push(&self, outcome: std::result::Result<T, ScriptError>) {
        if let Ok(mut outcomes) = self.inner.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    /// Let one gated invocation settle. Releases accumulate.
    pub fn release(&self) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(1);
        }
    }

    /// Wait until at least `count` invocations have started.
    pub async fn wait_for_invocations(&self, count: usize) {
        let mut rx = self.inner.invocations.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|started| *started >= count).await;
    }

    /// How many times the operation has been invoked.
    pub fn invocations(&self) -> usize {
        *self.inner.invocations.borrow()
    }
}

impl<T> Default for ScriptedOperation<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P, T> Operation<P> for ScriptedOperation<T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Output = T;
    type Error = ScriptError;

    async fn invoke(&self, _params: P) -> std::result::Result<T, ScriptError> {
        self.inner.invocations.send_modify(|started| *started += 1);

        if let Some(gate) = &self.inner.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let next = self
            .inner
            .outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front());
        next.unwrap_or_else(|| Err(ScriptError("script exhausted".to_string())))
    }
}

/// A memory backend that counts calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: MemoryBackend,
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
    removes: Arc<AtomicUsize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// The underlying memory backend, for seeding raw values.
    pub fn memory(&self) -> &MemoryBackend {
        &self.inner
    }
}

impl StorageBackend for RecordingBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove_item(key)
    }
}

/// A backend where every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingBackend;

impl StorageBackend for FailingBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Err(StorageError::Unavailable("failing backend".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Err(StorageError::Unavailable("failing backend".to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<()> {
        Err(StorageError::Unavailable("failing backend".to_string()))
    }
}
