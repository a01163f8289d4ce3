//! Two-factor verification error taxonomy
//!
//! Every failure the two-factor service reports to its callers is one of
//! these variants. `Display` yields the user-facing message; `error_code`
//! yields the stable code the HTTP layer puts in error bodies.

use raven_shared::errors::error_codes;
use thiserror::Error;

/// Failures of the two-factor verification flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwoFactorError {
    /// Another code was sent to this identity less than the cooldown ago
    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    CooldownActive { retry_after_seconds: u64 },

    /// The hourly issuance cap has been reached; carries no retry hint
    #[error("Too many verification codes requested. Please try again later")]
    HourlyLimitExceeded,

    /// The email transport failed or timed out; the issued code was rolled back
    #[error("Failed to send verification code. Please try again")]
    DeliveryFailed,

    #[error("No verification code found. Please request a new code")]
    NotFound,

    #[error("Verification code has expired. Please request a new code")]
    Expired,

    /// Purpose differs from the one the code was issued for
    #[error("Invalid verification code")]
    PurposeMismatch,

    /// The entry was already at the attempt cap when verification was tried
    #[error("Too many verification attempts. Please request a new code")]
    AttemptsExceeded,

    /// The wrong code used up the last remaining attempt
    #[error("Too many failed attempts. Please request a new code")]
    AttemptsExhausted,

    #[error("Invalid verification code. {remaining} attempts remaining")]
    Mismatch { remaining: u32 },

    /// Unexpected internal failure on the verification path
    #[error("Verification failed. Please try again")]
    VerificationFailed,
}

impl TwoFactorError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TwoFactorError::CooldownActive { .. } | TwoFactorError::HourlyLimitExceeded => {
                error_codes::RATE_LIMIT_EXCEEDED
            }
            TwoFactorError::DeliveryFailed => error_codes::EMAIL_DELIVERY_FAILED,
            TwoFactorError::NotFound => error_codes::VERIFICATION_CODE_NOT_FOUND,
            TwoFactorError::Expired => error_codes::VERIFICATION_CODE_EXPIRED,
            TwoFactorError::AttemptsExceeded | TwoFactorError::AttemptsExhausted => {
                error_codes::MAX_ATTEMPTS_EXCEEDED
            }
            TwoFactorError::PurposeMismatch
            | TwoFactorError::Mismatch { .. }
            | TwoFactorError::VerificationFailed => error_codes::VERIFICATION_CODE_INVALID,
        }
    }

    /// Whether the failure comes from the rate limiter
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            TwoFactorError::CooldownActive { .. } | TwoFactorError::HourlyLimitExceeded
        )
    }

    /// Seconds the caller should wait before retrying, when known
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            TwoFactorError::CooldownActive { retry_after_seconds } => Some(*retry_after_seconds),
            _ => None,
        }
    }
}
