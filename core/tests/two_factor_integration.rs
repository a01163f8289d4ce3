//! Integration tests for the two-factor service through its public API

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use raven_core::domain::{CodePurpose, CODE_EXPIRY_MINUTES, MAX_ATTEMPTS, RATE_LIMIT_MINUTES};
    use raven_core::errors::TwoFactorError;
    use raven_core::services::two_factor::{
        CodeGenerator, EmailSenderTrait, ManualClock, TwoFactorConfig, TwoFactorService,
    };

    // Email sender that remembers the last body per recipient
    struct RecordingSender {
        inbox: Mutex<Vec<(String, String)>>,
        fail: AtomicBool,
    }

    impl RecordingSender {
        fn new() -> Self {
            Self {
                inbox: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            }
        }

        fn delivered(&self) -> usize {
            self.inbox.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EmailSenderTrait for RecordingSender {
        async fn send_email(
            &self,
            to: &str,
            _subject: &str,
            _html_body: &str,
            text_body: &str,
        ) -> Result<(), String> {
            if self.fail.load(Ordering::SeqCst) {
                return Err("mail relay unavailable".to_string());
            }
            self.inbox
                .lock()
                .unwrap()
                .push((to.to_string(), text_body.to_string()));
            Ok(())
        }
    }

    struct FixedCodes(Mutex<VecDeque<&'static str>>);

    impl FixedCodes {
        fn new(codes: &[&'static str]) -> Self {
            Self(Mutex::new(codes.iter().copied().collect()))
        }
    }

    impl CodeGenerator for FixedCodes {
        fn generate(&self) -> String {
            self.0.lock().unwrap().pop_front().unwrap_or("999999").to_string()
        }
    }

    struct Setup {
        service: TwoFactorService<RecordingSender>,
        sender: Arc<RecordingSender>,
        clock: Arc<ManualClock>,
    }

    fn setup(codes: &[&'static str]) -> Setup {
        let sender = Arc::new(RecordingSender::new());
        let clock = Arc::new(ManualClock::starting_now());
        let service = TwoFactorService::with_components(
            sender.clone(),
            clock.clone(),
            Arc::new(FixedCodes::new(codes)),
            TwoFactorConfig::default(),
        );
        Setup {
            service,
            sender,
            clock,
        }
    }

    #[tokio::test]
    async fn alice_logs_in_with_emailed_code() {
        let s = setup(&["482913"]);
        let alice = "alice@example.com";

        let sent = s
            .service
            .send_verification_code(alice, CodePurpose::Login)
            .await
            .unwrap();
        assert_eq!(sent.expires_in_minutes, CODE_EXPIRY_MINUTES);

        let (to, body) = s.sender.inbox.lock().unwrap()[0].clone();
        assert_eq!(to, alice);
        assert!(body.contains("482913"));

        let result = s
            .service
            .verify_code(alice, "482913", CodePurpose::Login)
            .await
            .unwrap();
        assert!(result.verified);

        let second = s
            .service
            .verify_code(alice, "482913", CodePurpose::Login)
            .await
            .unwrap_err();
        assert_eq!(second, TwoFactorError::NotFound);
    }

    #[tokio::test]
    async fn bob_double_send_reports_wait_in_seconds() {
        let s = setup(&["111111", "222222"]);
        let bob = "bob@example.com";

        s.service
            .send_verification_code(bob, CodePurpose::Verification)
            .await
            .unwrap();
        let err = s
            .service
            .send_verification_code(bob, CodePurpose::Verification)
            .await
            .unwrap_err();

        let message = err.to_string();
        let seconds: u64 = message
            .split_whitespace()
            .find_map(|word| word.parse().ok())
            .expect("message should contain a number of seconds");
        assert!(seconds > 0);
        assert!(seconds <= (RATE_LIMIT_MINUTES * 60) as u64);
    }

    #[tokio::test]
    async fn issue_leaves_exactly_one_live_code() {
        let s = setup(&["111111", "222222"]);
        let who = "carol@example.com";

        s.service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap();
        s.clock.advance(Duration::minutes(RATE_LIMIT_MINUTES) + Duration::seconds(1));
        s.service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap();

        assert_eq!(s.service.active_code_count().unwrap(), 1);
        assert!(s
            .service
            .verify_code(who, "111111", CodePurpose::Login)
            .await
            .is_err());
        assert!(s
            .service
            .verify_code(who, "222222", CodePurpose::Login)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn exhausted_attempts_delete_the_code() {
        let s = setup(&["246810"]);
        let who = "dave@example.com";
        s.service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap();

        for _ in 0..MAX_ATTEMPTS {
            assert!(s
                .service
                .verify_code(who, "135791", CodePurpose::Login)
                .await
                .is_err());
        }

        assert_eq!(
            s.service
                .verify_code(who, "246810", CodePurpose::Login)
                .await
                .unwrap_err(),
            TwoFactorError::NotFound
        );
    }

    #[tokio::test]
    async fn expired_code_is_absent_afterwards() {
        let s = setup(&["246810"]);
        let who = "erin@example.com";
        s.service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap();

        s.clock.advance(Duration::minutes(CODE_EXPIRY_MINUTES + 1));

        assert!(s
            .service
            .verify_code(who, "246810", CodePurpose::Login)
            .await
            .is_err());
        assert!(s.service.get_code_status(who).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cooldown_then_success_then_hourly_cap() {
        let s = setup(&["100001", "100002", "100003", "100004", "100005", "100006"]);
        let who = "frank@example.com";

        s.service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap();
        assert!(s
            .service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap_err()
            .is_rate_limited());

        for _ in 0..4 {
            s.clock.advance(Duration::minutes(RATE_LIMIT_MINUTES) + Duration::seconds(1));
            s.service
                .send_verification_code(who, CodePurpose::Login)
                .await
                .unwrap();
        }

        s.clock.advance(Duration::minutes(RATE_LIMIT_MINUTES) + Duration::seconds(1));
        assert_eq!(
            s.service
                .send_verification_code(who, CodePurpose::Login)
                .await
                .unwrap_err(),
            TwoFactorError::HourlyLimitExceeded
        );
        assert_eq!(s.sender.delivered(), 5);
    }

    #[tokio::test]
    async fn failed_delivery_consumes_no_budget() {
        let s = setup(&["111111", "222222"]);
        let who = "grace@example.com";

        s.sender.fail.store(true, Ordering::SeqCst);
        assert_eq!(
            s.service
                .send_verification_code(who, CodePurpose::Login)
                .await
                .unwrap_err(),
            TwoFactorError::DeliveryFailed
        );
        assert!(s.service.get_code_status(who).await.unwrap().is_none());

        s.sender.fail.store(false, Ordering::SeqCst);
        assert!(s
            .service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn separate_services_are_isolated() {
        let first = setup(&["111111"]);
        let second = setup(&["222222"]);
        let who = "heidi@example.com";

        first
            .service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .unwrap();

        assert!(second.service.get_code_status(who).await.unwrap().is_none());
        assert!(second
            .service
            .send_verification_code(who, CodePurpose::Login)
            .await
            .is_ok());
    }
}
