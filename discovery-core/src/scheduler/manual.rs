use discovery::{ScheduledTask, Scheduler, Task};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Periodic {
    task: Task,
    next_run: Duration,
    period: Duration,
    cancelled: Arc<AtomicBool>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    immediate: VecDeque<Task>,
    periodic: Vec<Periodic>,
}

/// A scheduler driven by hand through a virtual clock.
///
/// Nothing runs until the test calls [`run_pending`](Self::run_pending) or
/// [`advance`](Self::advance); tasks then run on the caller's thread, in
/// deadline order.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of one-off tasks waiting to run.
    pub fn pending_count(&self) -> usize {
        self.lock().immediate.len()
    }

    /// Number of repeating tasks that have not been cancelled.
    pub fn scheduled_count(&self) -> usize {
        self.lock()
            .periodic
            .iter()
            .filter(|p| !p.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Runs every queued one-off task.
    ///
    /// # Returns
    ///
    /// * The number of tasks run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.lock().immediate.pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Moves the clock forward, running one-off tasks first and then every
    /// repeating task that comes due, as many times as it comes due.
    ///
    /// # Returns
    ///
    /// * The number of repeating executions performed.
    pub fn advance(&self, by: Duration) -> usize {
        self.run_pending();

        let target = self.lock().now + by;
        let mut ran = 0;
        loop {
            let due = {
                let mut state = self.lock();
                state
                    .periodic
                    .retain(|p| !p.cancelled.load(Ordering::SeqCst));
                let next = state
                    .periodic
                    .iter_mut()
                    .filter(|p| p.next_run <= target)
                    .min_by_key(|p| p.next_run)
                    .map(|p| {
                        let run_at = p.next_run;
                        p.next_run += p.period;
                        (run_at, p.task.clone())
                    });
                match next {
                    Some((run_at, task)) => {
                        state.now = run_at;
                        Some(task)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            match due {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Scheduler for ManualScheduler {
    fn execute(&self, task: Task) {
        self.lock().immediate.push_back(task);
    }

    fn schedule_at_fixed_rate(
        &self,
        task: Task,
        initial_delay: Duration,
        period: Duration,
    ) -> Box<dyn ScheduledTask> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut state = self.lock();
        let next_run = state.now + initial_delay;
        state.periodic.push(Periodic {
            task,
            next_run,
            // A zero period would spin forever on a single advance.
            period: period.max(Duration::from_nanos(1)),
            cancelled: cancelled.clone(),
        });
        Box::new(ManualScheduledTask { cancelled })
    }
}

struct ManualScheduledTask {
    cancelled: Arc<AtomicBool>,
}

impl ScheduledTask for ManualScheduledTask {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_task(counter: &Arc<AtomicUsize>) -> Task {
        let counter = counter.clone();
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_execute_waits_for_run_pending() {
        let scheduler = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.execute(counting_task(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending_count(), 1);

        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_advance_runs_each_due_tick() {
        let scheduler = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let period = Duration::from_secs(10);

        let _handle = scheduler.schedule_at_fixed_rate(counting_task(&counter), period, period);

        assert_eq!(scheduler.advance(Duration::from_secs(9)), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 1);
        assert_eq!(scheduler.advance(Duration::from_secs(30)), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 4);
        assert_eq!(scheduler.now(), Duration::from_secs(40));
    }

    #[test]
    fn test_cancelled_task_stops_running() {
        let scheduler = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let period = Duration::from_secs(1);

        let handle = scheduler.schedule_at_fixed_rate(counting_task(&counter), period, period);
        scheduler.advance(Duration::from_secs(2));
        handle.cancel();
        scheduler.advance(Duration::from_secs(5));

        assert!(handle.is_cancelled());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.scheduled_count(), 0);
    }
}
