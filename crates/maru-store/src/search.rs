//! # Search Debouncer
//!
//! Delays propagation of the typed search term by 500 ms with a
//! restartable timer: each keystroke cancels and reschedules the pending
//! commit, so the catalog filters once the user pauses, not on every
//! character.

use chrono::{DateTime, Duration, Utc};

use crate::scheduler::TimerQueue;

/// Debounce delay between the last keystroke and the committed term,
/// in milliseconds.
pub const SEARCH_DEBOUNCE_MS: i64 = 500;

/// Single timer key; there is only ever one pending search commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DebounceKey;

/// The live and debounced search terms.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    /// What the input field currently shows.
    term: String,

    /// What the catalog actually filters by.
    committed: String,

    timer: TimerQueue<DebounceKey>,
}

impl SearchDebouncer {
    /// Creates a debouncer with empty terms.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw term as typed.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The debounced term the catalog filter should use.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Records a keystroke and restarts the 500 ms timer.
    pub fn set_term(&mut self, term: &str, now: DateTime<Utc>) {
        self.term = term.to_string();
        self.timer.schedule(
            DebounceKey,
            now,
            Duration::milliseconds(SEARCH_DEBOUNCE_MS),
        );
    }

    /// Commits the pending term if its timer has elapsed.
    ///
    /// Returns `true` when the committed term changed, i.e. the catalog
    /// needs re-filtering.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if self.timer.fire_due(now).is_empty() {
            return false;
        }
        if self.committed == self.term {
            return false;
        }
        self.committed = self.term.clone();
        true
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

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    #[test]
    fn test_commits_after_delay() {
        let mut search = SearchDebouncer::new();
        search.set_term("wid", t0());

        assert!(!search.poll(t0() + ms(499)));
        assert_eq!(search.committed(), "");

        assert!(search.poll(t0() + ms(500)));
        assert_eq!(search.committed(), "wid");
    }

    #[test]
    fn test_keystroke_restarts_timer() {
        let mut search = SearchDebouncer::new();
        search.set_term("w", t0());
        search.set_term("wi", t0() + ms(300));
        search.set_term("wid", t0() + ms(600));

        // 500ms after the first keystroke: nothing committed, the timer
        // was restarted twice.
        assert!(!search.poll(t0() + ms(500)));

        // 500ms after the last keystroke: the final term lands at once.
        assert!(search.poll(t0() + ms(1_100)));
        assert_eq!(search.committed(), "wid");
        assert_eq!(search.term(), "wid");
    }

    #[test]
    fn test_unchanged_term_does_not_report_change() {
        let mut search = SearchDebouncer::new();
        search.set_term("widget", t0());
        assert!(search.poll(t0() + ms(500)));

        // Retyping the same value fires the timer but commits nothing new.
        search.set_term("widget", t0() + ms(600));
        assert!(!search.poll(t0() + ms(1_200)));
    }
}
