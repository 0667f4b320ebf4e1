//! Structured events emitted after each refresh attempt.

use crate::model::error::DiscoveryError;
use chrono::{DateTime, Utc};

/// A refresh attempt that failed. The snapshot was left untouched.
#[derive(Debug, Clone)]
pub struct RefreshFailure {
    pub service_type: String,
    pub pool: String,
    pub error: DiscoveryError,
    pub timestamp: DateTime<Utc>,
}

/// A refresh attempt that replaced the snapshot.
#[derive(Debug, Clone)]
pub struct RefreshSuccess {
    pub service_type: String,
    pub pool: String,
    /// Number of descriptors in the new snapshot.
    pub count: usize,
    /// Number of descriptors returned by the backend but dropped by the filter.
    pub dropped: usize,
    pub timestamp: DateTime<Utc>,
}
