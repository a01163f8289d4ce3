//! SMTP Email Service
//!
//! Delivers mail through an SMTP relay using lettre's async tokio transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use raven_shared::config::SmtpConfig;

use raven_shared::utils::validation::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// Email service backed by an SMTP relay
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl SmtpEmailService {
    /// Build the transport from configuration
    ///
    /// Uses STARTTLS when `use_tls` is set and a plain connection otherwise.
    /// Credentials are only attached when both username and password exist.
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let address: Address = config.from_email.parse().map_err(|e| {
            InfrastructureError::Config(format!(
                "Invalid SMTP_FROM_EMAIL '{}': {}",
                config.from_email, e
            ))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server).map_err(|e| {
                InfrastructureError::Config(format!(
                    "Invalid SMTP relay '{}': {}",
                    config.server, e
                ))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
        };

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(
            host = %config.server,
            port = config.port,
            tls = config.use_tls,
            authenticated = config.has_credentials(),
            "SMTP email service configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
            host: config.server.clone(),
        })
    }

    fn build_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let recipient: Mailbox = to.parse().map_err(|_| {
            InfrastructureError::Address(format!("Invalid recipient address: {}", mask_email(to)))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(format!("<{}@{}>", message_id, self.from.email.domain())))
            .multipart(MultiPart::alternative_plain_html(
                text_body.to_string(),
                html_body.to_string(),
            ))
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<String, InfrastructureError> {
        let message_id = Uuid::new_v4().to_string();
        let message = self.build_message(to, subject, html_body, text_body, &message_id)?;

        match self.transport.send(message).await {
            Ok(response) => {
                info!(
                    target: "email_service",
                    provider = "smtp",
                    email = %mask_email(to),
                    message_id = %message_id,
                    code = %response.code(),
                    "Email sent successfully"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "email_service",
                    provider = "smtp",
                    host = %self.host,
                    email = %mask_email(to),
                    error = %e,
                    "SMTP delivery failed"
                );
                Err(InfrastructureError::Email(e.to_string()))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }

    async fn is_available(&self) -> bool {
        self.transport.test_connection().await.unwrap_or(false)
    }
}
