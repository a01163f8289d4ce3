//! Two-factor service orchestrating code issuance, delivery and verification

use std::sync::Arc;
use tracing::{error, info, warn};

use raven_shared::utils::validation::mask_email;

use crate::domain::entities::verification_code::{CodePurpose, CODE_EXPIRY_MINUTES};
use crate::errors::{DomainError, DomainResult, TwoFactorError};

use super::clock::{Clock, SystemClock};
use super::config::TwoFactorConfig;
use super::generator::{CodeGenerator, SecureCodeGenerator};
use super::locks::IdentityLocks;
use super::rate_limiter::RateLimiter;
use super::reaper::Sweeper;
use super::store::VerificationCodeStore;
use super::templates::render_verification_email;
use super::traits::EmailSenderTrait;
use super::types::{
    CodeStatus, SendCodeResult, SweepReport, TwoFactorInfo, VerifyCodeResult, CODE_SENT_MESSAGE,
    VERIFICATION_SUCCESS_MESSAGE,
};

/// Two-factor service for email verification codes
///
/// Owns the code store and the rate limiter. Send and verify for the same
/// identity are serialized; different identities proceed concurrently.
pub struct TwoFactorService<E: EmailSenderTrait> {
    email_sender: Arc<E>,
    store: VerificationCodeStore,
    rate_limiter: RateLimiter,
    locks: IdentityLocks,
    config: TwoFactorConfig,
}

impl<E: EmailSenderTrait> TwoFactorService<E> {
    /// Create a service backed by the wall clock and the OS CSPRNG
    pub fn new(email_sender: Arc<E>, config: TwoFactorConfig) -> Self {
        Self::with_components(
            email_sender,
            Arc::new(SystemClock),
            Arc::new(SecureCodeGenerator),
            config,
        )
    }

    /// Create a service with an explicit clock and code generator
    pub fn with_components(
        email_sender: Arc<E>,
        clock: Arc<dyn Clock>,
        generator: Arc<dyn CodeGenerator>,
        config: TwoFactorConfig,
    ) -> Self {
        Self {
            email_sender,
            store: VerificationCodeStore::new(clock.clone(), generator),
            rate_limiter: RateLimiter::new(clock),
            locks: IdentityLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &TwoFactorConfig {
        &self.config
    }

    /// Send a verification code to an email address
    ///
    /// Sweeps expired state, consults the rate limiter, issues a code and
    /// emails it. A failed delivery removes the issued code and does not
    /// count against the rate limit.
    pub async fn send_verification_code(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<SendCodeResult, TwoFactorError> {
        let _guard = self.locks.acquire(email).await;
        self.sweep_logged();

        if let Err(e) = self.rate_limiter.check(email) {
            if let DomainError::TwoFactor(reason) = &e {
                warn!(
                    email = %mask_email(email),
                    reason = %reason,
                    event = "rate_limit_exceeded",
                    "Verification code request rejected by rate limiter"
                );
            }
            return Err(Self::send_failure(e));
        }

        let code = self
            .store
            .issue(email, purpose)
            .map_err(Self::send_failure)?;

        let message = render_verification_email(
            &self.config.service_name,
            &self.config.support_email,
            &code,
            purpose,
            CODE_EXPIRY_MINUTES,
        );

        if let Err(e) = self
            .email_sender
            .send_email(email, &message.subject, &message.html_body, &message.text_body)
            .await
        {
            error!(
                email = %mask_email(email),
                error = %e,
                event = "code_delivery_failed",
                "Failed to deliver verification code"
            );
            if let Err(rollback) = self.store.remove(email) {
                error!(error = %rollback, "Failed to roll back undelivered verification code");
            }
            return Err(TwoFactorError::DeliveryFailed);
        }

        if let Err(e) = self.rate_limiter.record(email) {
            error!(
                email = %mask_email(email),
                error = %e,
                "Failed to record rate limit usage after successful send"
            );
        }

        info!(
            email = %mask_email(email),
            purpose = %purpose,
            event = "code_sent",
            "Verification code sent"
        );

        Ok(SendCodeResult {
            email: email.to_string(),
            purpose,
            expires_in_minutes: CODE_EXPIRY_MINUTES,
            message: CODE_SENT_MESSAGE.to_string(),
        })
    }

    /// Verify a code previously sent to an email address
    pub async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<VerifyCodeResult, TwoFactorError> {
        let _guard = self.locks.acquire(email).await;
        self.sweep_logged();

        match self.store.verify(email, code, purpose) {
            Ok(()) => {
                info!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    event = "code_verified",
                    "Successful two-factor verification"
                );
                Ok(VerifyCodeResult {
                    email: email.to_string(),
                    purpose,
                    verified: true,
                    message: VERIFICATION_SUCCESS_MESSAGE.to_string(),
                })
            }
            Err(DomainError::TwoFactor(reason)) => {
                warn!(
                    email = %mask_email(email),
                    reason = %reason,
                    event = "code_verification_failed",
                    "Two-factor verification failed"
                );
                Err(reason)
            }
            Err(e) => {
                error!(email = %mask_email(email), error = %e, "Verification code store failure");
                Err(TwoFactorError::VerificationFailed)
            }
        }
    }

    /// Status of the live code for an email address, `None` when there is none
    pub async fn get_code_status(&self, email: &str) -> Result<Option<CodeStatus>, TwoFactorError> {
        self.sweep_logged();

        self.store.status(email).map_err(|e| {
            error!(email = %mask_email(email), error = %e, "Verification code store failure");
            TwoFactorError::VerificationFailed
        })
    }

    /// Remove expired codes, lapsed rate-limit entries and idle identity locks
    pub fn sweep_expired(&self) -> DomainResult<SweepReport> {
        let codes_removed = self.store.sweep()?;
        let rate_limits_removed = self.rate_limiter.sweep()?;
        let idle_locks_pruned = self.locks.prune();

        Ok(SweepReport {
            codes_removed,
            rate_limits_removed,
            idle_locks_pruned,
        })
    }

    /// Static description of the verification policy
    pub fn info(&self) -> TwoFactorInfo {
        TwoFactorInfo::current()
    }

    /// Number of identities currently holding a code (expired ones included until swept)
    pub fn active_code_count(&self) -> DomainResult<usize> {
        self.store.len()
    }

    /// Sends counted against an identity in its current rate-limit window
    pub fn sent_count(&self, email: &str) -> DomainResult<u32> {
        self.rate_limiter.sent_count(email)
    }

    fn sweep_logged(&self) {
        if let Err(e) = self.sweep_expired() {
            error!(error = %e, "Inline sweep of expired verification state failed");
        }
    }

    fn send_failure(err: DomainError) -> TwoFactorError {
        match err {
            DomainError::TwoFactor(reason) => reason,
            other => {
                error!(error = %other, "Unexpected failure while sending verification code");
                TwoFactorError::DeliveryFailed
            }
        }
    }
}

impl<E: EmailSenderTrait + 'static> Sweeper for TwoFactorService<E> {
    fn sweep(&self) -> DomainResult<SweepReport> {
        self.sweep_expired()
    }
}
