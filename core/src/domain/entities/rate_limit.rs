//! Per-identity send history used by the two-factor rate limiter.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minimum spacing between two codes sent to the same identity
pub const RATE_LIMIT_MINUTES: i64 = 1;

/// Maximum number of codes sent to one identity within the hourly window
pub const MAX_CODES_PER_HOUR: u32 = 5;

/// Length of the counting window
pub const RATE_LIMIT_WINDOW_HOURS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    /// Timestamp of the most recent successful send
    pub last_sent_at: DateTime<Utc>,

    /// Sends counted in the current window
    pub count: u32,
}

impl RateLimitEntry {
    pub fn first(now: DateTime<Utc>) -> Self {
        Self {
            last_sent_at: now,
            count: 1,
        }
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_sent_at
    }

    /// The window has lapsed once more than an hour passed since the last send
    pub fn window_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now) > Duration::hours(RATE_LIMIT_WINDOW_HOURS)
    }

    /// Applies one successful send at `now`
    pub fn record(&mut self, now: DateTime<Utc>) {
        if self.window_lapsed(now) {
            *self = Self::first(now);
        } else {
            self.last_sent_at = now;
            self.count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_record_within_window_increments() {
        let mut entry = RateLimitEntry::first(at(0));
        entry.record(at(120));

        assert_eq!(entry.count, 2);
        assert_eq!(entry.last_sent_at, at(120));
    }

    #[test]
    fn test_record_after_window_resets() {
        let mut entry = RateLimitEntry::first(at(0));
        entry.record(at(60));
        entry.record(at(60 + 3601));

        assert_eq!(entry.count, 1);
        assert_eq!(entry.last_sent_at, at(3661));
    }

    #[test]
    fn test_exactly_one_hour_is_not_lapsed() {
        let entry = RateLimitEntry::first(at(0));
        assert!(!entry.window_lapsed(at(3600)));
        assert!(entry.window_lapsed(at(3601)));
    }
}
