use crate::model::events::{RefreshFailure, RefreshSuccess};

/// Side channel for refresh outcomes.
///
/// Callers of the selector never see refresh errors; they go here instead.
pub trait RefreshObserver: Send + Sync {
    fn on_refresh_failure(&self, event: &RefreshFailure);

    fn on_refresh_success(&self, _event: &RefreshSuccess) {}
}
