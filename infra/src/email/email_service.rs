//! Email Service Interface
//!
//! Defines the trait for email service implementations that deliver
//! verification codes and other transactional messages.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Email service trait for sending transactional mail
///
/// Implementations include:
/// - SMTP relay (lettre)
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a multipart message with plain-text and HTML alternatives
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier of the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Get the service provider name (e.g., "SMTP", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
