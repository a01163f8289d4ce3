//! Email Service Module
//!
//! Email delivery for verification codes.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all providers
//! - **Mock Implementation**: Console output for development
//! - **SMTP Support**: Production delivery via lettre
//! - **Timeout Adapter**: Bridges providers to the core sender trait
//! - **Security**: Address masking in logs

pub mod email_service;
pub mod email_trait_adapter;
pub mod mock_email;

// SMTP email service (feature-gated)
#[cfg(feature = "smtp-email")]
pub mod smtp;

pub use email_service::EmailService;
pub use email_trait_adapter::{EmailServiceAdapter, DEFAULT_SEND_TIMEOUT};
pub use mock_email::{MockEmail, MockEmailService};

#[cfg(feature = "smtp-email")]
pub use smtp::SmtpEmailService;

use raven_shared::config::{EmailConfig, EmailProvider};
use std::time::Duration;


/// Create an email service based on configuration
///
/// SMTP construction failures fall back to the mock service with a warning.
pub fn create_email_service(config: &EmailConfig) -> Box<dyn EmailService> {
    match config.provider {
        EmailProvider::Mock => Box::new(MockEmailService::new()),
        #[cfg(feature = "smtp-email")]
        EmailProvider::Smtp => match SmtpEmailService::new(&config.smtp) {
            Ok(service) => Box::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP email service: {}", e);
                tracing::warn!("Falling back to mock email service");
                Box::new(MockEmailService::new())
            }
        },
        #[cfg(not(feature = "smtp-email"))]
        EmailProvider::Smtp => {
            tracing::warn!("SMTP support not compiled in, using mock email service");
            Box::new(MockEmailService::new())
        }
    }
}

/// Create the core-facing sender with the configured delivery timeout
pub fn create_email_sender(config: &EmailConfig) -> EmailServiceAdapter {
    EmailServiceAdapter::new(
        create_email_service(config),
        Duration::from_secs(config.smtp.timeout_seconds),
    )
}
