//! Ephemeral user-facing messages.
//!
//! Entries are kept in insertion order. Each one is removed by its own
//! expiry task [`NOTIFICATION_TTL_MS`] after creation, or earlier by hand.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of a notification, in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 5_000;

/// Monotonic identifier, derived from the creation time in milliseconds.
pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// When this notification's expiry task fires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + chrono::Duration::milliseconds(NOTIFICATION_TTL_MS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    last_id: NotificationId,
}

impl NotificationQueue {
    /// Append a notification created at `at` and return its id.
    ///
    /// Ids follow the creation time in milliseconds, bumped when needed so
    /// they stay strictly increasing.
    pub(super) fn push(
        &mut self,
        message: String,
        kind: NotificationKind,
        at: DateTime<Utc>,
    ) -> NotificationId {
        let millis = NotificationId::try_from(at.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        self.entries.push(Notification {
            id,
            message,
            kind,
            created_at: at,
        });
        id
    }

    /// Remove the entry with `id`. Returns whether one was removed.
    pub(super) fn remove(&mut self, id: NotificationId) -> bool {
        let Some(index) = self.entries.iter().position(|n| n.id == id) else {
            return false;
        };
        self.entries.remove(index);
        true
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a NotificationQueue {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut queue = NotificationQueue::default();
        queue.push("first".into(), NotificationKind::Info, at(0));
        queue.push("second".into(), NotificationKind::Error, at(10));
        let messages: Vec<_> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_ids_are_unique_within_the_same_millisecond() {
        let mut queue = NotificationQueue::default();
        let a = queue.push("a".into(), NotificationKind::Info, at(0));
        let b = queue.push("b".into(), NotificationKind::Info, at(0));
        let c = queue.push("c".into(), NotificationKind::Info, at(0));
        assert_eq!(a, 1_700_000_000_000);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut queue = NotificationQueue::default();
        let id = queue.push("x".into(), NotificationKind::Info, at(0));
        assert!(!queue.remove(id + 1));
        assert_eq!(queue.len(), 1);
        assert!(queue.remove(id));
        assert!(queue.is_empty());
        assert!(!queue.remove(id));
    }

    #[test]
    fn test_expiry_is_five_seconds_after_creation() {
        let mut queue = NotificationQueue::default();
        let id = queue.push("x".into(), NotificationKind::Warning, at(0));
        assert_eq!(queue.get(id).unwrap().expires_at(), at(5_000));
    }
}
