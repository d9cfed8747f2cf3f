//! Cancellable delayed tasks
//!
//! The core never owns a clock. A form asks its [`Scheduler`] to call back
//! with a [`TaskId`] after a delay, and the host feeds the id back in when
//! the delay elapses. [`DismissalTimer`] remembers which id is current, so a
//! superseded task is ignored even when the host could not cancel it.

use std::time::Duration;

use tracing::debug;

/// Identifier of one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Host-side timer facility (browser `setTimeout`, a test clock, ...)
pub trait Scheduler {
    /// Arrange for `id` to be delivered back after `delay`
    fn schedule(&mut self, id: TaskId, delay: Duration);

    /// Drop a pending delivery; unknown or already delivered ids are ignored
    fn cancel(&mut self, id: TaskId);
}

/// The single pending auto-dismiss task of one form
#[derive(Debug, Default)]
pub struct DismissalTimer {
    next: u64,
    pending: Option<TaskId>,
}

impl DismissalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a new dismissal, cancelling the pending one when asked to
    pub fn arm<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        delay: Duration,
        cancel_pending: bool,
    ) -> TaskId {
        if cancel_pending {
            self.cancel(scheduler);
        }
        self.next += 1;
        let id = TaskId(self.next);
        scheduler.schedule(id, delay);
        self.pending = Some(id);
        debug!(task = id.0, delay_ms = delay.as_millis() as u64, "dismissal scheduled");
        id
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
            debug!(task = id.0, "dismissal cancelled");
        }
    }

    /// Whether a delivered id should run
    ///
    /// The current task runs and is cleared. Older tasks run only when
    /// cancellation is disabled, reproducing overlapping dismissals.
    pub fn fire(&mut self, id: TaskId, cancel_pending: bool) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            return true;
        }
        !cancel_pending && id.0 <= self.next
    }

    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }
}

/// Virtual-clock scheduler
///
/// Time only moves through [`ManualScheduler::advance`], which returns the
/// ids that came due in deadline order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: Vec<(Duration, TaskId)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn advance(&mut self, by: Duration) -> Vec<TaskId> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(Duration, TaskId)> = Vec::new();
        self.queue.retain(|&(at, id)| {
            if at <= now {
                due.push((at, id));
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, id: TaskId, delay: Duration) {
        self.queue.push((self.now + delay, id));
    }

    fn cancel(&mut self, id: TaskId) {
        self.queue.retain(|&(_, queued)| queued != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(5000);

    #[test]
    fn test_manual_scheduler_orders_by_deadline() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TaskId(1), Duration::from_millis(300));
        scheduler.schedule(TaskId(2), Duration::from_millis(100));
        scheduler.schedule(TaskId(3), Duration::from_millis(900));

        assert_eq!(
            scheduler.advance(Duration::from_millis(500)),
            vec![TaskId(2), TaskId(1)]
        );
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(400)), vec![TaskId(3)]);
        assert_eq!(scheduler.now(), Duration::from_millis(900));
    }

    #[test]
    fn test_rearm_cancels_previous() {
        let mut scheduler = ManualScheduler::new();
        let mut timer = DismissalTimer::new();

        let first = timer.arm(&mut scheduler, DELAY, true);
        scheduler.advance(Duration::from_millis(2000));
        let second = timer.arm(&mut scheduler, DELAY, true);
        assert_ne!(first, second);
        assert_eq!(scheduler.pending(), 1);

        assert!(scheduler.advance(Duration::from_millis(3000)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(2000)), vec![second]);
        assert!(timer.fire(second, true));
        assert_eq!(timer.pending(), None);
    }

    #[test]
    fn test_stale_delivery_is_ignored() {
        let mut timer = DismissalTimer::new();
        let mut scheduler = ManualScheduler::new();
        let first = timer.arm(&mut scheduler, DELAY, true);
        let second = timer.arm(&mut scheduler, DELAY, true);

        // A host that could not cancel still delivers the first id
        assert!(!timer.fire(first, true));
        assert!(timer.fire(second, true));
        assert!(!timer.fire(second, true));
    }

    #[test]
    fn test_overlapping_when_cancellation_disabled() {
        let mut timer = DismissalTimer::new();
        let mut scheduler = ManualScheduler::new();
        let first = timer.arm(&mut scheduler, DELAY, false);
        scheduler.advance(Duration::from_millis(1000));
        let second = timer.arm(&mut scheduler, DELAY, false);
        assert_eq!(scheduler.pending(), 2);

        assert_eq!(scheduler.advance(DELAY), vec![first, second]);
        assert!(timer.fire(first, false));
        assert!(timer.fire(second, false));
    }
}
