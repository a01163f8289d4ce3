//! Integration tests wiring the two-factor service to the email providers

use std::sync::Arc;
use std::time::Duration;

use raven_core::domain::CodePurpose;
use raven_core::errors::TwoFactorError;
use raven_core::services::two_factor::{TwoFactorConfig, TwoFactorService};
use raven_infra::email::{EmailServiceAdapter, MockEmailService};

fn service_with(mock: &MockEmailService, timeout: Duration) -> TwoFactorService<EmailServiceAdapter> {
    let adapter = EmailServiceAdapter::new(Box::new(mock.clone()), timeout);
    TwoFactorService::new(Arc::new(adapter), TwoFactorConfig::default())
}

#[tokio::test]
async fn test_code_round_trip_through_mock_provider() {
    let mock = MockEmailService::with_options(false, false);
    let service = service_with(&mock, Duration::from_secs(10));
    let email = "alice@example.com";

    service
        .send_verification_code(email, CodePurpose::Registration)
        .await
        .unwrap();

    let message = mock.last_message_to(email).unwrap();
    assert_eq!(message.subject, "Raven AI - Complete Your Registration");
    assert!(message.html_body.contains("Welcome to Raven AI!"));

    let code = mock.last_code_for(email).unwrap();
    assert_eq!(code.len(), 6);

    let result = service
        .verify_code(email, &code, CodePurpose::Registration)
        .await
        .unwrap();
    assert!(result.verified);
}

#[tokio::test]
async fn test_provider_failure_rolls_back_issued_code() {
    let mock = MockEmailService::with_options(false, true);
    let service = service_with(&mock, Duration::from_secs(10));
    let email = "bob@example.com";

    let err = service
        .send_verification_code(email, CodePurpose::Login)
        .await
        .unwrap_err();
    assert_eq!(err, TwoFactorError::DeliveryFailed);
    assert!(service.get_code_status(email).await.unwrap().is_none());

    mock.set_simulate_failure(false);
    assert!(service
        .send_verification_code(email, CodePurpose::Login)
        .await
        .is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_slow_provider_is_treated_as_delivery_failure() {
    let mock = MockEmailService::with_options(false, false).with_latency(Duration::from_secs(60));
    let service = service_with(&mock, Duration::from_secs(10));
    let email = "carol@example.com";

    let err = service
        .send_verification_code(email, CodePurpose::Verification)
        .await
        .unwrap_err();

    assert_eq!(err, TwoFactorError::DeliveryFailed);
    assert!(service.get_code_status(email).await.unwrap().is_none());
    assert_eq!(service.sent_count(email).unwrap(), 0);
}
