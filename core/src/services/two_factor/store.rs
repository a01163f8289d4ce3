//! In-memory verification code store
//!
//! Holds at most one live code per identity. Every read path treats an
//! entry past its expiry as absent and removes it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::domain::entities::verification_code::{CodePurpose, VerificationEntry, MAX_ATTEMPTS};
use crate::errors::{DomainError, DomainResult, TwoFactorError};

use super::clock::Clock;
use super::generator::CodeGenerator;
use super::types::CodeStatus;

pub struct VerificationCodeStore {
    entries: Mutex<HashMap<String, VerificationEntry>>,
    clock: Arc<dyn Clock>,
    generator: Arc<dyn CodeGenerator>,
}

impl VerificationCodeStore {
    pub fn new(clock: Arc<dyn Clock>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            generator,
        }
    }

    fn entries(&self) -> DomainResult<MutexGuard<'_, HashMap<String, VerificationEntry>>> {
        self.entries
            .lock()
            .map_err(|_| DomainError::internal("verification code store lock poisoned"))
    }

    /// Issues a fresh code, replacing any entry the identity already had
    pub fn issue(&self, identity: &str, purpose: CodePurpose) -> DomainResult<String> {
        let code = self.generator.generate();
        let entry = VerificationEntry::new(code.clone(), purpose, self.clock.now());

        let replaced = self.entries()?.insert(identity.to_string(), entry).is_some();
        if replaced {
            debug!(event = "code_replaced", purpose = %purpose, "Replaced previous verification code");
        }

        Ok(code)
    }

    /// Checks `supplied` against the live code for `identity`
    ///
    /// Checks run in a fixed order: presence, expiry, purpose, attempt cap,
    /// then the code itself. Success, expiry and exhausting the attempts all
    /// delete the entry; a purpose mismatch leaves it untouched.
    pub fn verify(&self, identity: &str, supplied: &str, purpose: CodePurpose) -> DomainResult<()> {
        let now = self.clock.now();
        let mut entries = self.entries()?;

        let entry = entries
            .get_mut(identity)
            .ok_or(TwoFactorError::NotFound)?;

        if entry.is_expired_at(now) {
            entries.remove(identity);
            return Err(TwoFactorError::Expired.into());
        }

        if entry.purpose != purpose {
            return Err(TwoFactorError::PurposeMismatch.into());
        }

        if entry.attempts_exhausted() {
            entries.remove(identity);
            return Err(TwoFactorError::AttemptsExceeded.into());
        }

        if entry.matches(supplied) {
            entries.remove(identity);
            return Ok(());
        }

        let remaining = entry.record_failed_attempt();
        if remaining == 0 {
            entries.remove(identity);
            return Err(TwoFactorError::AttemptsExhausted.into());
        }

        Err(TwoFactorError::Mismatch { remaining }.into())
    }

    /// Snapshot of the live code, `None` when absent or expired
    pub fn status(&self, identity: &str) -> DomainResult<Option<CodeStatus>> {
        let now = self.clock.now();
        let mut entries = self.entries()?;

        let expired = match entries.get(identity) {
            None => return Ok(None),
            Some(entry) if entry.is_expired_at(now) => true,
            Some(entry) => {
                return Ok(Some(CodeStatus {
                    expires_in_seconds: entry.expires_in_seconds(now),
                    attempts_used: entry.attempts,
                    max_attempts: MAX_ATTEMPTS,
                    purpose: entry.purpose,
                }))
            }
        };

        if expired {
            entries.remove(identity);
        }
        Ok(None)
    }

    /// Removes the entry for `identity`; returns whether one existed
    pub fn remove(&self, identity: &str) -> DomainResult<bool> {
        Ok(self.entries()?.remove(identity).is_some())
    }

    /// Removes every expired entry and returns how many were dropped
    pub fn sweep(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        Ok(before - entries.len())
    }

    /// Number of stored entries, including expired ones not yet swept
    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }
}
