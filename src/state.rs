//! Session-scoped poller state.
//!
//! Tracks:
//! - Which completion events have already been surfaced this session
//! - The poll cursor (lower bound for the next check)
//! - Activity counters
//!
//! All of it is process-local, never persisted, and cleared by
//! [`SessionState::reset`] at session boundaries (e.g. logout).

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};

use crate::types::DeliveryKey;

/// Default bound on remembered delivery keys.
pub const DEFAULT_DELIVERED_CAPACITY: usize = 4096;

/// Snapshot of poller activity counters.
#[derive(Debug, Clone, Default)]
pub struct PollerStats {
    /// Checks that completed and advanced the cursor
    pub checks_completed: u64,
    /// Checks that failed or found the endpoint unavailable
    pub checks_failed: u64,
    /// Notifications queued over the session
    pub delivered_total: u64,
    /// When the last successful check finished
    pub last_success_at: Option<DateTime<Utc>>,
}

/// Delivered-set and poll cursor for one UI session.
#[derive(Debug)]
pub struct SessionState {
    delivered: HashSet<DeliveryKey>,
    /// Insertion order of delivered keys, oldest first
    delivered_order: VecDeque<DeliveryKey>,
    delivered_capacity: usize,
    cursor: Option<DateTime<Utc>>,
    stats: PollerStats,
}

impl SessionState {
    /// Create state bounded to `delivered_capacity` remembered keys.
    pub fn new(delivered_capacity: usize) -> Self {
        Self {
            delivered: HashSet::new(),
            delivered_order: VecDeque::new(),
            delivered_capacity: delivered_capacity.max(1),
            cursor: None,
            stats: PollerStats::default(),
        }
    }

    /// Whether this completion event was already surfaced.
    pub fn is_delivered(&self, key: &DeliveryKey) -> bool {
        self.delivered.contains(key)
    }

    /// Remember a surfaced completion event.
    ///
    /// Past the capacity bound the oldest keys are forgotten first, which
    /// makes re-delivery of a very old event possible again.
    pub fn mark_delivered(&mut self, key: DeliveryKey) {
        if !self.delivered.insert(key.clone()) {
            return;
        }
        self.delivered_order.push_back(key);

        while self.delivered_order.len() > self.delivered_capacity {
            if let Some(oldest) = self.delivered_order.pop_front() {
                self.delivered.remove(&oldest);
            }
        }
    }

    /// Current poll cursor.
    pub fn cursor(&self) -> Option<DateTime<Utc>> {
        self.cursor
    }

    /// Record a successful check: advance the cursor and bump counters.
    pub fn record_success(&mut self, newly_delivered: u64, at: DateTime<Utc>) {
        self.cursor = Some(at);
        self.stats.checks_completed += 1;
        self.stats.delivered_total += newly_delivered;
        self.stats.last_success_at = Some(at);
    }

    /// Record a check that did not advance the cursor.
    pub fn record_failure(&mut self) {
        self.stats.checks_failed += 1;
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> PollerStats {
        self.stats.clone()
    }

    /// Number of remembered delivery keys.
    pub fn delivered_len(&self) -> usize {
        self.delivered.len()
    }

    /// Clear delivered-set, cursor, and counters.
    pub fn reset(&mut self) {
        self.delivered.clear();
        self.delivered_order.clear();
        self.cursor = None;
        self.stats = PollerStats::default();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERED_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(goal_id: i64, minute: u32) -> DeliveryKey {
        use chrono::TimeZone;
        DeliveryKey {
            goal_id,
            completed_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0).unwrap()),
        }
    }

    #[test]
    fn test_mark_and_check_delivered() {
        let mut state = SessionState::default();
        let k = key(1, 0);

        assert!(!state.is_delivered(&k));
        state.mark_delivered(k.clone());
        assert!(state.is_delivered(&k));

        // Same goal, later completion: a distinct event
        assert!(!state.is_delivered(&key(1, 5)));
    }

    #[test]
    fn test_duplicate_mark_is_noop() {
        let mut state = SessionState::default();
        state.mark_delivered(key(1, 0));
        state.mark_delivered(key(1, 0));
        assert_eq!(state.delivered_len(), 1);
    }

    #[test]
    fn test_capacity_prunes_oldest_first() {
        let mut state = SessionState::new(2);
        state.mark_delivered(key(1, 0));
        state.mark_delivered(key(2, 0));
        state.mark_delivered(key(3, 0));

        assert_eq!(state.delivered_len(), 2);
        assert!(!state.is_delivered(&key(1, 0)));
        assert!(state.is_delivered(&key(2, 0)));
        assert!(state.is_delivered(&key(3, 0)));
    }

    #[test]
    fn test_cursor_advances_only_on_success() {
        let mut state = SessionState::default();
        assert!(state.cursor().is_none());

        state.record_failure();
        assert!(state.cursor().is_none());

        let now = Utc::now();
        state.record_success(0, now);
        assert_eq!(state.cursor(), Some(now));

        let stats = state.stats();
        assert_eq!(stats.checks_completed, 1);
        assert_eq!(stats.checks_failed, 1);
        assert_eq!(stats.last_success_at, Some(now));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = SessionState::default();
        state.mark_delivered(key(1, 0));
        state.record_success(1, Utc::now());

        state.reset();

        assert_eq!(state.delivered_len(), 0);
        assert!(state.cursor().is_none());
        assert_eq!(state.stats().checks_completed, 0);
        assert_eq!(state.stats().delivered_total, 0);
    }
}
