//! Unit tests for the send rate limiter

use chrono::Duration;
use std::sync::Arc;

use super::mocks::test_clock;
use crate::errors::{DomainError, TwoFactorError};
use crate::services::two_factor::{ManualClock, RateLimiter};

const BOB: &str = "bob@example.com";

fn limiter() -> (RateLimiter, Arc<ManualClock>) {
    let clock = test_clock();
    (RateLimiter::new(clock.clone()), clock)
}

fn denial(result: Result<(), DomainError>) -> TwoFactorError {
    match result {
        Err(DomainError::TwoFactor(reason)) => reason,
        other => panic!("expected a rate limit denial, got {:?}", other),
    }
}

#[test]
fn test_unknown_identity_is_allowed() {
    let (limiter, _) = limiter();
    assert!(limiter.check(BOB).is_ok());
    assert_eq!(limiter.sent_count(BOB).unwrap(), 0);
}

#[test]
fn test_cooldown_immediately_after_send() {
    let (limiter, _) = limiter();
    limiter.record(BOB).unwrap();

    let err = denial(limiter.check(BOB));
    assert_eq!(err, TwoFactorError::CooldownActive { retry_after_seconds: 60 });
    assert!(err.to_string().contains("60 seconds"));
}

#[test]
fn test_cooldown_rounds_up() {
    let (limiter, clock) = limiter();
    limiter.record(BOB).unwrap();
    clock.advance(Duration::milliseconds(20_500));

    assert_eq!(
        denial(limiter.check(BOB)),
        TwoFactorError::CooldownActive { retry_after_seconds: 40 }
    );

    clock.advance(Duration::milliseconds(39_400));
    assert_eq!(
        denial(limiter.check(BOB)),
        TwoFactorError::CooldownActive { retry_after_seconds: 1 }
    );
}

#[test]
fn test_cooldown_ends_after_one_minute() {
    let (limiter, clock) = limiter();
    limiter.record(BOB).unwrap();
    clock.advance(Duration::minutes(1));

    assert!(limiter.check(BOB).is_ok());
}

#[test]
fn test_hourly_cap_without_retry_hint() {
    let (limiter, clock) = limiter();
    for _ in 0..5 {
        assert!(limiter.check(BOB).is_ok());
        limiter.record(BOB).unwrap();
        clock.advance(Duration::seconds(61));
    }

    let err = denial(limiter.check(BOB));
    assert_eq!(err, TwoFactorError::HourlyLimitExceeded);
    assert_eq!(err.retry_after_seconds(), None);
    assert_eq!(limiter.sent_count(BOB).unwrap(), 5);
}

#[test]
fn test_hourly_cap_lifts_after_an_hour_of_silence() {
    let (limiter, clock) = limiter();
    for _ in 0..5 {
        limiter.record(BOB).unwrap();
        clock.advance(Duration::seconds(61));
    }
    assert!(limiter.check(BOB).is_err());

    clock.advance(Duration::hours(1));
    assert!(limiter.check(BOB).is_ok());

    limiter.record(BOB).unwrap();
    assert_eq!(limiter.sent_count(BOB).unwrap(), 1);
}

#[test]
fn test_identities_are_independent() {
    let (limiter, _) = limiter();
    limiter.record(BOB).unwrap();

    assert!(limiter.check(BOB).is_err());
    assert!(limiter.check("alice@example.com").is_ok());
}

#[test]
fn test_sweep_drops_entries_older_than_an_hour() {
    let (limiter, clock) = limiter();
    limiter.record(BOB).unwrap();
    clock.advance(Duration::minutes(30));
    limiter.record("alice@example.com").unwrap();
    clock.advance(Duration::minutes(31));

    assert_eq!(limiter.sweep().unwrap(), 1);
    assert_eq!(limiter.len().unwrap(), 1);
    assert_eq!(limiter.sent_count(BOB).unwrap(), 0);
}
