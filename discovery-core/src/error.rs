use std::time::Duration;
use thiserror::Error;

/// Errors raised synchronously by selector construction and lifecycle calls.
///
/// Refresh failures are never reported here; they go to the selector's
/// observer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("service type must not be empty")]
    EmptyType,

    #[error("pool must not be empty")]
    EmptyPool,

    #[error("refresh interval {0:?} is below the minimum of {1:?}")]
    IntervalTooShort(Duration, Duration),

    /// `start()` was called on a selector that has been stopped.
    #[error("selector for {service_type}/{pool} is stopped and cannot be restarted")]
    Stopped { service_type: String, pool: String },
}

/// Failure to load selector configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read selector configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid selector configuration: {0}")]
    Invalid(#[from] SelectorError),
}
