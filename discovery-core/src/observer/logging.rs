use discovery::{RefreshFailure, RefreshObserver, RefreshSuccess};
use log::{debug, warn};

/// Sends refresh outcomes to the `log` facade.
///
/// Failures are logged at `warn`, successes at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl RefreshObserver for LoggingObserver {
    fn on_refresh_failure(&self, event: &RefreshFailure) {
        warn!(
            "Discovery refresh failed for {}/{} at {}: {}",
            event.service_type,
            event.pool,
            event.timestamp.to_rfc3339(),
            event.error
        );
    }

    fn on_refresh_success(&self, event: &RefreshSuccess) {
        debug!(
            "Discovery refresh for {}/{} at {}: {} services ({} dropped)",
            event.service_type,
            event.pool,
            event.timestamp.to_rfc3339(),
            event.count,
            event.dropped
        );
    }
}
