use chrono::{DateTime, Utc};
use discovery::DiscoveryError;

/// Result of a single refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot was replaced.
    Updated { count: usize, dropped: usize },
    /// The backend call failed; the snapshot is unchanged.
    Failed(DiscoveryError),
    /// Another refresh of the same selector was in flight.
    Skipped,
    /// The selector was stopped before the result could be applied.
    Discarded,
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Running totals of refresh outcomes for one selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub successes: u64,
    pub failures: u64,
    pub skipped: u64,
    pub discarded: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
}

impl RefreshStats {
    /// Total number of refreshes that reached the backend.
    pub fn attempts(&self) -> u64 {
        self.successes + self.failures + self.discarded
    }
}
