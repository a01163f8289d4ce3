//! Domain entities representing core business objects.

pub mod rate_limit;
pub mod verification_code;

// Re-export commonly used types
pub use rate_limit::{RateLimitEntry, MAX_CODES_PER_HOUR, RATE_LIMIT_MINUTES, RATE_LIMIT_WINDOW_HOURS};
pub use verification_code::{
    CodePurpose, VerificationEntry, CODE_EXPIRY_MINUTES, CODE_LENGTH, MAX_ATTEMPTS,
};
