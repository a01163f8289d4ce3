//! Mock Email Service Implementation
//!
//! A mock implementation of the email service for development and testing.
//! Messages are logged to the console instead of being sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use raven_shared::utils::validation::{is_valid_email, mask_email};

use super::email_service::EmailService;
use crate::InfrastructureError;

/// A message captured by the mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEmail {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Mock email service for development and testing
///
/// Clones share the counter, the captured messages and the failure switch.
#[derive(Clone)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last message per recipient
    last_messages: Arc<Mutex<HashMap<String, MockEmail>>>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
    /// Artificial delivery latency
    latency: Option<Duration>,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockEmailService {
    /// Create a new mock email service that prints to the console
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_messages: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            latency: None,
            console_output,
        }
    }

    /// Delay every send by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter and forget captured messages
    pub fn reset(&self) {
        self.message_count.store(0, Ordering::SeqCst);
        self.last_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// The last message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<MockEmail> {
        self.last_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(to)
            .cloned()
    }

    /// The verification code in the last message sent to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.last_message_to(to).and_then(|message| {
            message
                .text_body
                .lines()
                .find_map(|line| line.trim().strip_prefix("Verification Code:"))
                .map(|code| code.trim().to_string())
        })
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Address(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Mock email service simulating failure for: {}",
                mask_email(to)
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let masked = mask_email(to);

        if self.console_output {
            // Development output shows the full message
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} (masked: {})", to, masked);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("{}", text_body.trim());
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "mock",
            email = %masked,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );

        self.last_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                to.to_string(),
                MockEmail {
                    message_id: message_id.clone(),
                    to: to.to_string(),
                    subject: subject.to_string(),
                    html_body: html_body.to_string(),
                    text_body: text_body.to_string(),
                },
            );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
