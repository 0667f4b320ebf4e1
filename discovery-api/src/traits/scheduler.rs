//! Defines the scheduling capability injected into selectors.
//!
//! A single scheduler is normally shared by every selector in the process.
//! Keeping it behind a trait lets tests drive time by hand instead of sleeping.

use std::sync::Arc;
use std::time::Duration;

/// A unit of work handed to a scheduler. It may run many times.
pub type Task = Arc<dyn Fn() + Send + Sync>;

/// Runs tasks on a background execution context.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once, as soon as possible, off the caller's thread.
    fn execute(&self, task: Task);

    /// Runs `task` after `initial_delay` and then every `period`.
    ///
    /// Executions of the same scheduled task never overlap: a tick that comes
    /// due while the previous execution is still running waits for it.
    fn schedule_at_fixed_rate(
        &self,
        task: Task,
        initial_delay: Duration,
        period: Duration,
    ) -> Box<dyn ScheduledTask>;
}

/// Handle on a repeating task.
pub trait ScheduledTask: Send + Sync {
    /// Prevents any further execution. An execution already running is not
    /// interrupted.
    fn cancel(&self);

    fn is_cancelled(&self) -> bool;
}
