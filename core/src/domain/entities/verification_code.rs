//! Verification code entity for email-based two-factor authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Expiration time for verification codes (10 minutes)
pub const CODE_EXPIRY_MINUTES: i64 = 10;

/// Why a code was issued; must match between issuance and verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Registration,
    Login,
    #[default]
    Verification,
}

impl CodePurpose {
    pub const ALL: [CodePurpose; 3] = [
        CodePurpose::Registration,
        CodePurpose::Login,
        CodePurpose::Verification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
            CodePurpose::Login => "login",
            CodePurpose::Verification => "verification",
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodePurpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(CodePurpose::Registration),
            "login" => Ok(CodePurpose::Login),
            "verification" => Ok(CodePurpose::Verification),
            other => Err(DomainError::Validation {
                message: format!(
                    "Invalid purpose '{}'. Must be one of: registration, login, verification",
                    other
                ),
            }),
        }
    }
}

/// The single live code held for an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    /// The 6-digit verification code, leading zeros preserved
    pub code: String,

    /// Purpose the code was issued for
    pub purpose: CodePurpose,

    /// Number of failed verification attempts
    pub attempts: u32,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl VerificationEntry {
    /// Creates a fresh entry expiring `CODE_EXPIRY_MINUTES` after `now`
    pub fn new(code: String, purpose: CodePurpose, now: DateTime<Utc>) -> Self {
        Self::with_ttl(code, purpose, now, Duration::minutes(CODE_EXPIRY_MINUTES))
    }

    pub fn with_ttl(code: String, purpose: CodePurpose, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code,
            purpose,
            attempts: 0,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// An entry is dead strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= MAX_ATTEMPTS
    }

    /// Records a failed attempt and returns the attempts still available
    pub fn record_failed_attempt(&mut self) -> u32 {
        self.attempts = (self.attempts + 1).min(MAX_ATTEMPTS);
        self.remaining_attempts()
    }

    pub fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Whole seconds until expiry, zero once expired
    pub fn expires_in_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    /// Whether `supplied` matches the stored code after trimming whitespace
    pub fn matches(&self, supplied: &str) -> bool {
        supplied.trim() == self.code
    }
}
