//! Email Service Trait Adapter
//!
//! Bridges any infrastructure `EmailService` to the core `EmailSenderTrait`,
//! bounding each delivery with a timeout.

use async_trait::async_trait;
use raven_core::services::two_factor::EmailSenderTrait;
use std::time::Duration;
use tracing::{debug, warn};

use raven_shared::utils::validation::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// Default upper bound for one delivery
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Adapter that implements the core `EmailSenderTrait`
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    timeout: Duration,
}

impl EmailServiceAdapter {
    pub fn new(inner: Box<dyn EmailService>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn with_default_timeout(inner: Box<dyn EmailService>) -> Self {
        Self::new(inner, DEFAULT_SEND_TIMEOUT)
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }

    /// Sends through the wrapped service, failing with `Timeout` past the bound
    pub async fn deliver(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<String, InfrastructureError> {
        match tokio::time::timeout(
            self.timeout,
            self.inner.send_email(to, subject, html_body, text_body),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.inner.provider_name(),
                    email = %mask_email(to),
                    timeout_seconds = self.timeout.as_secs(),
                    "Email delivery timed out"
                );
                Err(InfrastructureError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

#[async_trait]
impl EmailSenderTrait for EmailServiceAdapter {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), String> {
        let message_id = self
            .deliver(to, subject, html_body, text_body)
            .await
            .map_err(|e| e.to_string())?;
        debug!(message_id = %message_id, "Verification email handed to provider");
        Ok(())
    }
}
