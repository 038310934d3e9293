//! Pending notification queue.

use crate::types::Achievement;

/// Ordered queue of achievements awaiting display.
///
/// Insertion order is discovery order. Dismissal removes entries without
/// reordering the rest.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Achievement>,
}

impl NotificationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an achievement, preserving arrival order.
    pub fn push(&mut self, achievement: Achievement) {
        self.entries.push(achievement);
    }

    /// Remove every entry with the given goal id.
    ///
    /// Idempotent: dismissing an absent id is a no-op. Returns how many
    /// entries were removed.
    pub fn dismiss(&mut self, goal_id: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != goal_id);
        before - self.entries.len()
    }

    /// Ordered snapshot of pending notifications.
    pub fn pending(&self) -> Vec<Achievement> {
        self.entries.clone()
    }

    /// Number of pending notifications.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all pending notifications.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
