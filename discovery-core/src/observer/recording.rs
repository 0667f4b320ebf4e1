use discovery::{RefreshFailure, RefreshObserver, RefreshSuccess};
use std::sync::Mutex;

/// Keeps every refresh event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    failures: Mutex<Vec<RefreshFailure>>,
    successes: Mutex<Vec<RefreshSuccess>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<RefreshFailure> {
        self.failures.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<RefreshSuccess> {
        self.successes.lock().unwrap().clone()
    }
}

impl RefreshObserver for RecordingObserver {
    fn on_refresh_failure(&self, event: &RefreshFailure) {
        self.failures.lock().unwrap().push(event.clone());
    }

    fn on_refresh_success(&self, event: &RefreshSuccess) {
        self.successes.lock().unwrap().push(event.clone());
    }
}
