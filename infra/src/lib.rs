//! # Infrastructure Layer
//!
//! Concrete implementations of the external services the Raven AI
//! two-factor core depends on.
//!
//! ## Features
//!
//! - `smtp-email`: Enable SMTP delivery through lettre (default)

/// Email service module - SMTP and mock providers
pub mod email;

pub use email::{create_email_sender, create_email_service, EmailService, EmailServiceAdapter};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Email transport error
    #[error("Email service error: {0}")]
    Email(String),

    /// Invalid sender or recipient address
    #[error("Invalid email address: {0}")]
    Address(String),

    /// Delivery exceeded its time bound
    #[error("Email delivery timed out after {0} seconds")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
