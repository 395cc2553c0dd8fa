//! # uistate fetch
//!
//! Loading/error/data state tracking for a single asynchronous operation.
//!
//! ## Overview
//!
//! A [`CallTracker`] wraps an [`Operation`] (any async closure returning a
//! `Result`) and records the lifecycle of its invocations in a [`CallState`]:
//! the last resolved value, the last failure message, and whether a call is
//! in flight. Observers read snapshots or subscribe to changes through a
//! `tokio::sync::watch` channel.
//!
//! ## Key Types
//!
//! - [`Operation`] - The async trait for wrapped operations
//! - [`CallTracker`] - Owner of the call state and the only writer to it
//! - [`CallState`] - Immutable snapshot handed to observers
//! - [`CallPhase`] - `Idle` / `Loading` / `Succeeded` / `Failed`
//!
//! ## Usage
//!
//! ```rust
//! use uistate_fetch::{CallPhase, CallTracker};
//!
//! # async fn example() {
//! let tracker = CallTracker::new(|id: u32| async move {
//!     Ok::<_, String>(format!("user-{id}"))
//! });
//!
//! let user = tracker.call(7).await.unwrap();
//! assert_eq!(user, "user-7");
//! assert_eq!(tracker.phase(), CallPhase::Succeeded);
//!
//! // Already has data: nothing happens.
//! assert!(tracker.call_if_pristine(8).await.is_none());
//! # }
//! ```
//!
//! ## Design Notes
//!
//! - **Errors are re-raised**: `call` records the failure message and still
//!   returns the operation's original error to the caller.
//! - **Last known good value**: a new call clears `error` immediately but keeps
//!   `data` until the new attempt settles.
//! - **No deduplication**: overlapping `call`s are allowed and race; only
//!   `call_if_pristine` is guarded.

pub mod operation;
pub mod state;
pub mod tracker;

pub use operation::Operation;
pub use state::{CallPhase, CallState};
pub use tracker::CallTracker;
