//! # uistate testkit
//!
//! Testing utilities for uistate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a scriptable [`ScriptedOperation`] whose outcomes and
//!   settlement timing the test controls, and instrumented storage backends
//! - **Generators**: proptest strategies for flat JSON records
//!
//! ## Scripted Operations
//!
//! ```rust
//! use uistate_fetch::CallTracker;
//! use uistate_testkit::ScriptedOperation;
//!
//! # async fn example() {
//! let op = ScriptedOperation::<String>::new();
//! op.resolve("first");
//! op.reject("second failed");
//!
//! let tracker = CallTracker::new(op.clone());
//! assert_eq!(tracker.call(()).await.unwrap(), "first");
//! assert!(tracker.call(()).await.is_err());
//! assert_eq!(op.invocations(), 2);
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use uistate_storage::shallow_merge;
//! use uistate_testkit::generators::flat_record;
//!
//! proptest! {
//!     #[test]
//!     fn merge_is_idempotent(record in flat_record()) {
//!         let once = shallow_merge(record.clone(), record.clone());
//!         prop_assert_eq!(once, record);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{FailingBackend, RecordingBackend, ScriptError, ScriptedOperation};
pub use generators::{flat_record, record_updates};
