//! Business services containing domain logic and use cases.

pub mod two_factor;

// Re-export commonly used types
pub use two_factor::{
    EmailSenderTrait, ExpiryReaper, ReaperHandle, SendCodeResult, TwoFactorConfig,
    TwoFactorService, VerifyCodeResult,
};
