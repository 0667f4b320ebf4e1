//! Scheduler implementations.
//!
//! - `runtime`: production scheduler on a tokio runtime.
//! - `manual`: virtual-clock scheduler for deterministic tests.

pub mod runtime;

#[cfg(any(test, feature = "test-utils"))]
pub mod manual;

pub use runtime::{TokioScheduledTask, TokioScheduler};

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualScheduler;
