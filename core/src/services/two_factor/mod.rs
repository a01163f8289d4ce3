//! Two-factor verification module for email-based authentication
//!
//! This module provides the complete verification code workflow:
//! - Code generation, storage and verification with attempt tracking
//! - Cooldown and hourly rate limiting per identity
//! - Delivery through an injected email sender
//! - A background reaper purging expired state

mod clock;
mod config;
mod generator;
mod locks;
mod rate_limiter;
mod reaper;
mod service;
mod store;
mod templates;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TwoFactorConfig, DEFAULT_SWEEP_INTERVAL_SECONDS};
pub use generator::{CodeGenerator, SecureCodeGenerator, SeededCodeGenerator};
pub use locks::IdentityLocks;
pub use rate_limiter::RateLimiter;
pub use reaper::{ExpiryReaper, ReaperHandle, Sweeper};
pub use service::TwoFactorService;
pub use store::VerificationCodeStore;
pub use templates::{purpose_message, purpose_title, render_verification_email, VerificationEmail};
pub use traits::EmailSenderTrait;
pub use types::{
    CodeStatus, SendCodeResult, SweepReport, TwoFactorInfo, VerifyCodeResult, CODE_SENT_MESSAGE,
    VERIFICATION_SUCCESS_MESSAGE,
};
