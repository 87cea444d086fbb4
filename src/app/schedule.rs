//! One-shot timed tasks.
//!
//! Each task is scheduled independently and can be cancelled through its
//! handle. The host drives time: [`Scheduler::take_due`] hands back every
//! task whose deadline has passed, earliest first.

use chrono::{DateTime, Utc};

use super::notifications::NotificationId;

/// Work a scheduled task performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ExpireNotification(NotificationId),
}

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    handle: TaskHandle,
    due: DateTime<Utc>,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_handle: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn schedule(&mut self, due: DateTime<Utc>, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Scheduled { handle, due, task });
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Remove and return every task due at or before `now`, in deadline order.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Task> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;
        due.sort_by_key(|s| (s.due, s.handle));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Deadline of the next pending task.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|s| s.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_take_due_returns_only_elapsed_tasks_in_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(t(300), Task::ExpireNotification(3));
        scheduler.schedule(t(100), Task::ExpireNotification(1));
        scheduler.schedule(t(200), Task::ExpireNotification(2));

        assert_eq!(
            scheduler.take_due(t(250)),
            vec![Task::ExpireNotification(1), Task::ExpireNotification(2)]
        );
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_due(), Some(t(300)));
        assert!(scheduler.take_due(t(299)).is_empty());
        assert_eq!(scheduler.take_due(t(300)), vec![Task::ExpireNotification(3)]);
        assert_eq!(scheduler.len(), 0);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut scheduler = Scheduler::default();
        let handle = scheduler.schedule(t(100), Task::ExpireNotification(1));
        scheduler.schedule(t(100), Task::ExpireNotification(2));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(
            scheduler.take_due(t(0) + Duration::seconds(1)),
            vec![Task::ExpireNotification(2)]
        );
    }
}
