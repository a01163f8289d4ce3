//! Types for two-factor service results

use serde::{Deserialize, Serialize};

use crate::domain::entities::rate_limit::{MAX_CODES_PER_HOUR, RATE_LIMIT_MINUTES};
use crate::domain::entities::verification_code::{
    CodePurpose, CODE_EXPIRY_MINUTES, CODE_LENGTH, MAX_ATTEMPTS,
};

pub const CODE_SENT_MESSAGE: &str = "Verification code sent successfully";
pub const VERIFICATION_SUCCESS_MESSAGE: &str = "Verification successful";

/// Result of sending a verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCodeResult {
    pub email: String,
    pub purpose: CodePurpose,
    pub expires_in_minutes: i64,
    pub message: String,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResult {
    pub email: String,
    pub purpose: CodePurpose,
    pub verified: bool,
    pub message: String,
}

/// Snapshot of the live code for an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStatus {
    pub expires_in_seconds: i64,
    pub attempts_used: u32,
    pub max_attempts: u32,
    pub purpose: CodePurpose,
}

/// What one sweep removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub codes_removed: usize,
    pub rate_limits_removed: usize,
    pub idle_locks_pruned: usize,
}

impl SweepReport {
    pub fn total_removed(&self) -> usize {
        self.codes_removed + self.rate_limits_removed
    }
}

/// Static echo of the two-factor policy constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorInfo {
    pub code_length: usize,
    pub code_expiry_minutes: i64,
    pub max_attempts: u32,
    pub rate_limit_minutes: i64,
    pub max_codes_per_hour: u32,
}

impl TwoFactorInfo {
    pub const fn current() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_expiry_minutes: CODE_EXPIRY_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            rate_limit_minutes: RATE_LIMIT_MINUTES,
            max_codes_per_hour: MAX_CODES_PER_HOUR,
        }
    }
}
