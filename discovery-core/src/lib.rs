//! # Discovery Core Library
//!
//! Keeps an in-process, always-readable view of the instances of a service
//! type in a pool, refreshed from a discovery backend in the background.
//!
//! ## Modules
//! - `selector`: the caching selector and the factory building it.
//! - `scheduler`: where refreshes run (tokio runtime, or a manual clock in tests).
//! - `client`: discovery backends (in memory, JSON file, async adapters).
//! - `observer`: where refresh failures are reported.
//! - `config`: selector configuration loading and validation.

pub mod client;
pub mod config;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod selector;

pub use crate::config::ServiceSelectorConfig;
pub use crate::error::{ConfigError, SelectorError};
pub use crate::selector::{
    CachingServiceSelector, RefreshOutcome, RefreshStats, SelectorState, ServiceSelectorFactory,
};
