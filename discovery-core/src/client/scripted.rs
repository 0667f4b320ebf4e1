use discovery::{DiscoveryClient, DiscoveryError, ServiceDescriptor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

/// A test client whose answer can be switched at any time.
///
/// Returns exactly what it was told to, without filtering, which makes it
/// suitable for simulating a misbehaving backend. It can also be paused to
/// hold a refresh in flight.
#[derive(Default)]
pub struct ScriptedDiscoveryClient {
    response: Mutex<Option<Result<Vec<ServiceDescriptor>, DiscoveryError>>>,
    calls: AtomicUsize,
    gate: Arc<(Mutex<bool>, Condvar)>,
}

impl ScriptedDiscoveryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(descriptors: Vec<ServiceDescriptor>) -> Self {
        let client = Self::new();
        client.set_services(descriptors);
        client
    }

    pub fn set_services(&self, descriptors: Vec<ServiceDescriptor>) {
        *self.response.lock().unwrap() = Some(Ok(descriptors));
    }

    pub fn set_error(&self, error: DiscoveryError) {
        *self.response.lock().unwrap() = Some(Err(error));
    }

    /// Number of `list_services` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes subsequent calls block until [`resume`](Self::resume).
    pub fn pause(&self) {
        *self.gate.0.lock().unwrap() = true;
    }

    pub fn resume(&self) {
        let (paused, cvar) = &*self.gate;
        *paused.lock().unwrap() = false;
        cvar.notify_all();
    }
}

impl DiscoveryClient for ScriptedDiscoveryClient {
    fn list_services(&self, _service_type: &str) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (paused, cvar) = &*self.gate;
        let mut guard = paused.lock().unwrap();
        while *guard {
            guard = cvar.wait(guard).unwrap();
        }
        drop(guard);

        self.response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
