//! The caching selector: a periodically refreshed, lock-free snapshot of the
//! instances of one service type in one pool.
//!
//! Lifecycle is `Constructed -> Started -> Stopped`. Reads are valid in every
//! state. Only a started selector is refreshed by its schedule, and a stopped
//! selector keeps serving its last snapshot but can never be started again.
//!
//! A refresh that completes after `stop()` is discarded: the snapshot swap is
//! done under the lifecycle lock, so once `stop()` returns the snapshot is
//! frozen.

use crate::config::ServiceSelectorConfig;
use crate::error::SelectorError;
use crate::observer::LoggingObserver;
use crate::selector::stats::{RefreshOutcome, RefreshStats};
use arc_swap::ArcSwap;
use chrono::Utc;
use discovery::{
    DiscoveryClient, RefreshFailure, RefreshObserver, RefreshSuccess, ScheduledTask, Scheduler,
    ServiceDescriptor, ServiceSelector, Task,
};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

/// Public view of the selector lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Constructed,
    Started,
    Stopped,
}

enum Lifecycle {
    Constructed,
    Started(Box<dyn ScheduledTask>),
    Stopped,
}

impl Lifecycle {
    fn state(&self) -> SelectorState {
        match self {
            Lifecycle::Constructed => SelectorState::Constructed,
            Lifecycle::Started(_) => SelectorState::Started,
            Lifecycle::Stopped => SelectorState::Stopped,
        }
    }
}

/// Clears the in-flight flag when a refresh ends, even by unwinding.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State shared between the selector and its scheduled refresh task.
struct Shared {
    service_type: String,
    pool: String,
    client: Arc<dyn DiscoveryClient>,
    observer: Arc<dyn RefreshObserver>,
    snapshot: ArcSwap<Vec<ServiceDescriptor>>,
    lifecycle: Mutex<Lifecycle>,
    refreshing: AtomicBool,
    stats: Mutex<RefreshStats>,
}

impl Shared {
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn stats(&self) -> MutexGuard<'_, RefreshStats> {
        self.stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn refresh(&self) -> RefreshOutcome {
        if self.refreshing.swap(true, Ordering::AcqRel) {
            debug!(
                "Refresh of {}/{} already in flight, skipping",
                self.service_type, self.pool
            );
            self.stats().skipped += 1;
            return RefreshOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.refreshing);

        // The only blocking call; no lock is held across it.
        let descriptors = match self.client.list_services(&self.service_type) {
            Ok(descriptors) => descriptors,
            Err(error) => {
                let event = RefreshFailure {
                    service_type: self.service_type.clone(),
                    pool: self.pool.clone(),
                    error: error.clone(),
                    timestamp: Utc::now(),
                };
                {
                    let mut stats = self.stats();
                    stats.failures += 1;
                    stats.last_failure = Some(event.timestamp);
                }
                self.observer.on_refresh_failure(&event);
                return RefreshOutcome::Failed(error);
            }
        };

        let returned = descriptors.len();
        // The snapshot is a set: repeated descriptors are kept once.
        let mut seen = HashSet::with_capacity(returned);
        let filtered: Vec<ServiceDescriptor> = descriptors
            .into_iter()
            .filter(|d| d.matches(&self.service_type, &self.pool))
            .filter(|d| seen.insert(d.clone()))
            .collect();
        let count = filtered.len();
        let dropped = returned - count;
        if dropped > 0 {
            debug!(
                "Dropped {} of {} descriptors not matching {}/{} or repeated",
                dropped, returned, self.service_type, self.pool
            );
        }

        {
            let lifecycle = self.lifecycle();
            if matches!(*lifecycle, Lifecycle::Stopped) {
                debug!(
                    "Selector {}/{} stopped during refresh, discarding result",
                    self.service_type, self.pool
                );
                drop(lifecycle);
                self.stats().discarded += 1;
                return RefreshOutcome::Discarded;
            }
            self.snapshot.store(Arc::new(filtered));
        }

        let event = RefreshSuccess {
            service_type: self.service_type.clone(),
            pool: self.pool.clone(),
            count,
            dropped,
            timestamp: Utc::now(),
        };
        {
            let mut stats = self.stats();
            stats.successes += 1;
            stats.last_success = Some(event.timestamp);
        }
        self.observer.on_refresh_success(&event);

        RefreshOutcome::Updated { count, dropped }
    }
}

/// A [`ServiceSelector`] serving a cached snapshot refreshed on a schedule.
///
/// The selector owns its snapshot and its scheduled task. The discovery
/// client, the scheduler and the observer are injected and may be shared
/// with other selectors. Dropping the selector stops it.
pub struct CachingServiceSelector {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
    refresh_interval: Duration,
}

impl CachingServiceSelector {
    /// Creates a selector that reports refresh failures through the `log` facade.
    ///
    /// No I/O happens and nothing is scheduled until [`start`](Self::start).
    ///
    /// # Arguments
    ///
    /// * `service_type` - The service type to watch.
    /// * `config` - Pool and refresh interval.
    /// * `client` - The discovery backend.
    /// * `scheduler` - Where refreshes run.
    ///
    /// # Returns
    ///
    /// * `Ok(CachingServiceSelector)` with an empty snapshot.
    /// * `Err(SelectorError)` if the type or pool is blank, or the interval too short.
    pub fn new(
        service_type: &str,
        config: ServiceSelectorConfig,
        client: Arc<dyn DiscoveryClient>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, SelectorError> {
        Self::with_observer(
            service_type,
            config,
            client,
            scheduler,
            Arc::new(LoggingObserver),
        )
    }

    /// Same as [`new`](Self::new) with an explicit refresh observer.
    pub fn with_observer(
        service_type: &str,
        config: ServiceSelectorConfig,
        client: Arc<dyn DiscoveryClient>,
        scheduler: Arc<dyn Scheduler>,
        observer: Arc<dyn RefreshObserver>,
    ) -> Result<Self, SelectorError> {
        if service_type.trim().is_empty() {
            return Err(SelectorError::EmptyType);
        }
        config.validate()?;

        Ok(Self {
            shared: Arc::new(Shared {
                service_type: service_type.to_string(),
                pool: config.pool().to_string(),
                client,
                observer,
                snapshot: ArcSwap::from_pointee(Vec::new()),
                lifecycle: Mutex::new(Lifecycle::Constructed),
                refreshing: AtomicBool::new(false),
                stats: Mutex::new(RefreshStats::default()),
            }),
            scheduler,
            refresh_interval: config.refresh_interval(),
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn state(&self) -> SelectorState {
        self.shared.lifecycle().state()
    }

    /// Starts refreshing.
    ///
    /// The first call requests an immediate refresh from the scheduler and
    /// arms the periodic one; it returns without waiting for either. Further
    /// calls while started do nothing.
    ///
    /// # Returns
    ///
    /// * `Ok(())` once started.
    /// * `Err(SelectorError::Stopped)` if the selector was stopped.
    pub fn start(&self) -> Result<(), SelectorError> {
        let task = {
            let mut lifecycle = self.shared.lifecycle();
            match *lifecycle {
                Lifecycle::Started(_) => return Ok(()),
                Lifecycle::Stopped => {
                    return Err(SelectorError::Stopped {
                        service_type: self.shared.service_type.clone(),
                        pool: self.shared.pool.clone(),
                    })
                }
                Lifecycle::Constructed => {}
            }

            let task = self.refresh_task();
            let scheduled = self.scheduler.schedule_at_fixed_rate(
                task.clone(),
                self.refresh_interval,
                self.refresh_interval,
            );
            *lifecycle = Lifecycle::Started(scheduled);
            task
        };

        info!(
            "Started selector {}/{} (refresh every {:?})",
            self.shared.service_type, self.shared.pool, self.refresh_interval
        );
        // Requested after the lock is released: a scheduler may run it inline.
        self.scheduler.execute(task);
        Ok(())
    }

    /// Cancels the periodic refresh. The last snapshot stays readable.
    ///
    /// Idempotent. Stopping a selector that never started also makes it
    /// unstartable.
    pub fn stop(&self) {
        let previous = std::mem::replace(&mut *self.shared.lifecycle(), Lifecycle::Stopped);
        if let Lifecycle::Started(scheduled) = previous {
            scheduled.cancel();
            info!(
                "Stopped selector {}/{}",
                self.shared.service_type, self.shared.pool
            );
        }
    }

    /// Runs one refresh on the calling thread.
    ///
    /// Works in any state but `Stopped`, where the fetched result is
    /// discarded. Subject to the same single-flight rule as scheduled
    /// refreshes.
    pub fn refresh_now(&self) -> RefreshOutcome {
        self.shared.refresh()
    }

    /// Counters of refresh outcomes so far.
    pub fn stats(&self) -> RefreshStats {
        self.shared.stats().clone()
    }

    fn refresh_task(&self) -> Task {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Arc::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.refresh();
            }
        })
    }
}

impl ServiceSelector for CachingServiceSelector {
    fn service_type(&self) -> &str {
        &self.shared.service_type
    }

    fn pool(&self) -> &str {
        &self.shared.pool
    }

    fn select_all_services(&self) -> Arc<Vec<ServiceDescriptor>> {
        self.shared.snapshot.load_full()
    }
}

impl Drop for CachingServiceSelector {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CachingServiceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingServiceSelector")
            .field("service_type", &self.shared.service_type)
            .field("pool", &self.shared.pool)
            .field("refresh_interval", &self.refresh_interval)
            .field("state", &self.state())
            .finish()
    }
}
