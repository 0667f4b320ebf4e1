use discovery::{ScheduledTask, Scheduler, Task};
use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{self, MissedTickBehavior};

/// Scheduler backed by a tokio runtime.
///
/// Tasks are synchronous and may block on network I/O, so every execution is
/// moved onto the runtime's blocking pool. One scheduler is meant to be shared
/// by all selectors of a process.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates a scheduler on the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn execute(&self, task: Task) {
        self.handle.spawn_blocking(move || task());
    }

    fn schedule_at_fixed_rate(
        &self,
        task: Task,
        initial_delay: Duration,
        period: Duration,
    ) -> Box<dyn ScheduledTask> {
        let handle = self.handle.clone();
        // tokio rejects a zero period.
        let period = period.max(Duration::from_millis(1));
        let join = self.handle.spawn(async move {
            let start = time::Instant::now() + initial_delay;
            let mut ticker = time::interval_at(start, period);
            // A late tick is pushed back instead of being replayed in a burst.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let run = task.clone();
                // Awaiting the blocking execution keeps runs of this task serial.
                if let Err(e) = handle.spawn_blocking(move || run()).await {
                    if e.is_panic() {
                        error!("Scheduled task panicked: {}", e);
                    } else {
                        debug!("Scheduled task cancelled: {}", e);
                        break;
                    }
                }
            }
        });

        Box::new(TokioScheduledTask {
            abort: join.abort_handle(),
            cancelled: AtomicBool::new(false),
        })
    }
}

/// Cancellation handle returned by [`TokioScheduler::schedule_at_fixed_rate`].
pub struct TokioScheduledTask {
    abort: AbortHandle,
    cancelled: AtomicBool,
}

impl ScheduledTask for TokioScheduledTask {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.abort.abort();
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TokioScheduledTask {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
