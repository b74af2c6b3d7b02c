//! # Notifications Module
//!
//! Transient user-facing messages with automatic expiry.
//!
//! Every rejected operation and every successful mutation surfaces here;
//! nothing in the storefront throws at the user. Each notification lives
//! for 3 seconds, tracked by its own fire-once timer keyed by the
//! creation timestamp.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduler::TimerQueue;

/// How long a notification stays on screen, in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 3_000;

/// Notification severity, mapped to toast styling by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
}

/// A transient message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Creation timestamp in milliseconds - doubles as the timer key.
    pub id: i64,

    /// User-facing message text.
    pub message: String,

    /// Toast styling.
    pub severity: Severity,
}

/// Fire-and-forget notification sink.
///
/// The store emits through this trait so tests can capture messages
/// without a [`NotificationCenter`].
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity, now: DateTime<Utc>);
}

// =============================================================================
// Notification Center
// =============================================================================

/// Holds the active notifications and their expiry timers.
///
/// Multiple notifications may be pending at once; each has an independent
/// fire-once timer. Ids are creation-timestamp millis, bumped by one when
/// two notifications land in the same millisecond.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    active: Vec<Notification>,
    expiry: TimerQueue<i64>,
}

impl NotificationCenter {
    /// Creates an empty center.
    pub fn new() -> Self {
        Self::default()
    }

    /// The notifications currently on screen, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Adds a notification and schedules its expiry at `now + 3s`.
    ///
    /// Returns the assigned id.
    pub fn push(&mut self, message: &str, severity: Severity, now: DateTime<Utc>) -> i64 {
        let mut id = now.timestamp_millis();
        // Same-millisecond collisions would merge two expiry timers.
        while self.active.iter().any(|n| n.id == id) {
            id += 1;
        }

        self.active.push(Notification {
            id,
            message: message.to_string(),
            severity,
        });
        self.expiry.schedule(id, now, Duration::milliseconds(NOTIFICATION_TTL_MS));
        id
    }

    /// Removes a notification early (the user dismissed it).
    pub fn dismiss(&mut self, id: i64) {
        self.active.retain(|n| n.id != id);
        self.expiry.cancel(&id);
    }

    /// Removes every notification whose TTL has elapsed.
    ///
    /// Called by the event loop on each tick.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) {
        for id in self.expiry.fire_due(now) {
            self.active.retain(|n| n.id != id);
        }
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, message: &str, severity: Severity, now: DateTime<Utc>) {
        self.push(message, severity, now);
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
    fn test_push_and_expire_at_exactly_ttl() {
        let mut center = NotificationCenter::new();
        center.push("Added to cart", Severity::Success, t0());
        assert_eq!(center.active().len(), 1);

        center.sweep_expired(t0() + Duration::milliseconds(2_999));
        assert_eq!(center.active().len(), 1);

        center.sweep_expired(t0() + Duration::milliseconds(3_000));
        assert!(center.active().is_empty());
    }

    #[test]
    fn test_independent_expiry_timers() {
        let mut center = NotificationCenter::new();
        center.push("first", Severity::Success, t0());
        center.push("second", Severity::Error, t0() + Duration::seconds(2));

        center.sweep_expired(t0() + Duration::milliseconds(3_000));
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.active()[0].message, "second");

        center.sweep_expired(t0() + Duration::milliseconds(5_000));
        assert!(center.active().is_empty());
    }

    #[test]
    fn test_same_millisecond_ids_stay_unique() {
        let mut center = NotificationCenter::new();
        let a = center.push("a", Severity::Success, t0());
        let b = center.push("b", Severity::Success, t0());
        assert_ne!(a, b);
        assert_eq!(center.active().len(), 2);
    }

    #[test]
    fn test_dismiss_cancels_timer() {
        let mut center = NotificationCenter::new();
        let id = center.push("bye", Severity::Warning, t0());
        center.dismiss(id);

        assert!(center.active().is_empty());
        // No stale timer left behind.
        center.sweep_expired(t0() + Duration::seconds(10));
        assert!(center.active().is_empty());
    }
}
