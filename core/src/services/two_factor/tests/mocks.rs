//! Mock implementations for testing the two-factor service

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::services::two_factor::{
    CodeGenerator, EmailSenderTrait, ManualClock, TwoFactorConfig, TwoFactorService,
};

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl SentEmail {
    /// Pulls the code out of the plain-text body
    pub fn code(&self) -> Option<String> {
        self.text_body
            .lines()
            .find_map(|line| line.trim().strip_prefix("Verification Code: "))
            .map(|code| code.trim().to_string())
    }
}

// Mock email sender for testing
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub should_fail: AtomicBool,
    pub delay: Mutex<Option<Duration>>,
    pub attempts: AtomicUsize,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(false),
            delay: Mutex::new(None),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        let sender = Self::new();
        sender.set_should_fail(true);
        sender
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn last_email_to(&self, to: &str) -> Option<SentEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|email| email.to == to)
            .cloned()
    }

    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.last_email_to(to).and_then(|email| email.code())
    }
}

#[async_trait]
impl EmailSenderTrait for MockEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMTP connection refused".to_string());
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            text_body: text_body.to_string(),
        });
        Ok(())
    }
}

/// Hands out queued codes in order, then falls back to `000000`
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "000000".to_string())
    }
}

pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap(),
    ))
}

pub struct Harness {
    pub service: TwoFactorService<MockEmailSender>,
    pub sender: Arc<MockEmailSender>,
    pub clock: Arc<ManualClock>,
}

pub fn harness_with_codes(codes: &[&str]) -> Harness {
    let sender = Arc::new(MockEmailSender::new());
    let clock = test_clock();
    let service = TwoFactorService::with_components(
        sender.clone(),
        clock.clone(),
        Arc::new(SequenceCodeGenerator::new(codes)),
        TwoFactorConfig::default(),
    );
    Harness {
        service,
        sender,
        clock,
    }
}
