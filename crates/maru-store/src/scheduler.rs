//! # Scheduler Module
//!
//! Timers as explicit data: a key → due-instant map, polled by the event
//! loop with an injected clock.
//!
//! ## Why Not Real Timers?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Timer Model                                          │
//! │                                                                         │
//! │  The storefront has exactly two timed behaviors:                        │
//! │                                                                         │
//! │  Debounce (restartable)       Notification expiry (fire-once)          │
//! │  ─────────────────────        ───────────────────────────────          │
//! │  every keystroke:             every notification:                       │
//! │    schedule(key, now+500ms)     schedule(id, now+3000ms)               │
//! │  (replaces pending entry)     (one entry per notification)             │
//! │                                                                         │
//! │  Both reduce to: at most ONE pending instant per key, replaced on      │
//! │  reschedule, drained by fire_due(now). No threads, no runtime, and     │
//! │  tests pick `now` themselves.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};

/// A set of pending one-shot timers, at most one per key.
///
/// Scheduling an already-pending key replaces its due instant - that is
/// the cancel-and-reschedule semantics the debounce needs. Firing removes
/// the entry - the fire-once semantics expiry needs.
#[derive(Debug)]
pub struct TimerQueue<K> {
    pending: HashMap<K, DateTime<Utc>>,
}

// Manual impl: the derive would demand K: Default.
impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        TimerQueue {
            pending: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> TimerQueue<K> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        TimerQueue {
            pending: HashMap::new(),
        }
    }

    /// Schedules (or reschedules) `key` to fire at `now + delay`.
    pub fn schedule(&mut self, key: K, now: DateTime<Utc>, delay: Duration) {
        self.pending.insert(key, now + delay);
    }

    /// Cancels the pending timer for `key`, if any.
    pub fn cancel(&mut self, key: &K) {
        self.pending.remove(key);
    }

    /// Removes and returns every key whose due instant is ≤ `now`,
    /// ordered by due instant (earliest first).
    pub fn fire_due(&mut self, now: DateTime<Utc>) -> Vec<K> {
        let mut due: Vec<(K, DateTime<Utc>)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(k, at)| (k.clone(), *at))
            .collect();
        due.sort_by_key(|(_, at)| *at);

        for (key, _) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }

    /// Number of timers still pending.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_fires_at_exactly_the_due_instant() {
        let mut queue = TimerQueue::new();
        queue.schedule("a", t0(), Duration::milliseconds(500));

        assert!(queue.fire_due(t0() + Duration::milliseconds(499)).is_empty());
        assert_eq!(queue.fire_due(t0() + Duration::milliseconds(500)), vec!["a"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fire_once() {
        let mut queue = TimerQueue::new();
        queue.schedule("a", t0(), Duration::milliseconds(100));

        let later = t0() + Duration::seconds(1);
        assert_eq!(queue.fire_due(later), vec!["a"]);
        assert!(queue.fire_due(later).is_empty());
    }

    #[test]
    fn test_reschedule_replaces_pending_entry() {
        let mut queue = TimerQueue::new();
        queue.schedule("debounce", t0(), Duration::milliseconds(500));
        // A second keystroke 300ms later restarts the timer.
        let t1 = t0() + Duration::milliseconds(300);
        queue.schedule("debounce", t1, Duration::milliseconds(500));

        // Original due instant passes without firing.
        assert!(queue.fire_due(t0() + Duration::milliseconds(500)).is_empty());
        assert_eq!(
            queue.fire_due(t1 + Duration::milliseconds(500)),
            vec!["debounce"]
        );
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        queue.schedule("a", t0(), Duration::milliseconds(100));
        queue.cancel(&"a");

        assert!(queue.fire_due(t0() + Duration::seconds(1)).is_empty());
    }

    #[test]
    fn test_multiple_keys_fire_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(2u64, t0(), Duration::milliseconds(300));
        queue.schedule(1u64, t0(), Duration::milliseconds(100));
        queue.schedule(3u64, t0(), Duration::milliseconds(200));

        let fired = queue.fire_due(t0() + Duration::seconds(1));
        assert_eq!(fired, vec![1, 3, 2]);
    }
}
