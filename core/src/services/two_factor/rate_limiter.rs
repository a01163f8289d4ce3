//! Per-identity send rate limiter
//!
//! A cooldown between consecutive sends combined with an hourly cap whose
//! counter resets once more than an hour passes without a send. This is
//! reset-on-gap counting, not a sliding window.

use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::rate_limit::{
    RateLimitEntry, MAX_CODES_PER_HOUR, RATE_LIMIT_MINUTES, RATE_LIMIT_WINDOW_HOURS,
};
use crate::errors::{DomainError, DomainResult, TwoFactorError};

use super::clock::Clock;

pub struct RateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn entries(&self) -> DomainResult<MutexGuard<'_, HashMap<String, RateLimitEntry>>> {
        self.entries
            .lock()
            .map_err(|_| DomainError::internal("rate limiter lock poisoned"))
    }

    /// Whether a code may be sent to `identity` now
    pub fn check(&self, identity: &str) -> DomainResult<()> {
        let now = self.clock.now();
        let entries = self.entries()?;

        let Some(entry) = entries.get(identity) else {
            return Ok(());
        };

        let elapsed = entry.elapsed(now);
        let cooldown = Duration::minutes(RATE_LIMIT_MINUTES);

        if elapsed < cooldown {
            let remaining_ms = (cooldown - elapsed).num_milliseconds();
            let retry_after_seconds = ((remaining_ms + 999) / 1000).clamp(1, cooldown.num_seconds());
            return Err(TwoFactorError::CooldownActive {
                retry_after_seconds: retry_after_seconds as u64,
            }
            .into());
        }

        if elapsed < Duration::hours(RATE_LIMIT_WINDOW_HOURS) && entry.count >= MAX_CODES_PER_HOUR {
            return Err(TwoFactorError::HourlyLimitExceeded.into());
        }

        Ok(())
    }

    /// Counts one successful send to `identity`
    pub fn record(&self, identity: &str) -> DomainResult<()> {
        let now = self.clock.now();
        self.entries()?
            .entry(identity.to_string())
            .and_modify(|entry| entry.record(now))
            .or_insert_with(|| RateLimitEntry::first(now));
        Ok(())
    }

    /// Drops entries whose last send is more than an hour old
    pub fn sweep(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.window_lapsed(now));
        Ok(before - entries.len())
    }

    /// Sends counted for `identity` in its current window
    pub fn sent_count(&self, identity: &str) -> DomainResult<u32> {
        Ok(self.entries()?.get(identity).map_or(0, |entry| entry.count))
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.entries()?.len())
    }
}
