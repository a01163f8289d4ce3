//! Traits for email delivery integration

use async_trait::async_trait;

/// Trait for email delivery integration
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    /// Send a multipart email; `Err` carries a transport description for logging
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), String>;
}
