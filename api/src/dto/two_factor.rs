use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use raven_core::domain::entities::verification_code::{CodePurpose, CODE_LENGTH};
use raven_core::services::two_factor::{CodeStatus, SendCodeResult, VerifyCodeResult};
use raven_shared::utils::validation::{is_numeric_code, is_valid_email, normalize_code, normalize_email};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(invalid("invalid_email", "Invalid email address"))
    }
}

fn validate_purpose(purpose: &str) -> Result<(), ValidationError> {
    purpose.parse::<CodePurpose>().map(|_| ()).map_err(|_| {
        invalid(
            "invalid_purpose",
            "Purpose must be one of: registration, login, verification",
        )
    })
}

fn validate_code_format(code: &str) -> Result<(), ValidationError> {
    if is_numeric_code(&normalize_code(code), CODE_LENGTH) {
        Ok(())
    } else {
        Err(invalid("invalid_code", "Code must be exactly 6 digits"))
    }
}

fn parse_purpose(purpose: Option<&str>) -> CodePurpose {
    purpose
        .and_then(|p| p.parse().ok())
        .unwrap_or_default()
}

/// Body of `send-2fa-code` and `resend-2fa-code`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    /// One of `registration`, `login`, `verification`; defaults to `verification`
    #[serde(default)]
    #[validate(custom(function = "validate_purpose"))]
    pub purpose: Option<String>,
}

impl SendCodeRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Only meaningful after `validate()` succeeded
    pub fn purpose(&self) -> CodePurpose {
        parse_purpose(self.purpose.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    /// 6-digit code; spaces and dashes are ignored
    #[validate(custom(function = "validate_code_format"))]
    pub code: String,

    #[serde(default)]
    #[validate(custom(function = "validate_purpose"))]
    pub purpose: Option<String>,
}

impl VerifyCodeRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }

    pub fn purpose(&self) -> CodePurpose {
        parse_purpose(self.purpose.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CodeStatusRequest {
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
}

impl CodeStatusRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub email: String,
    pub purpose: CodePurpose,
    pub expires_in_minutes: i64,
}

impl From<SendCodeResult> for SendCodeResponse {
    fn from(result: SendCodeResult) -> Self {
        Self {
            email: result.email,
            purpose: result.purpose,
            expires_in_minutes: result.expires_in_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub email: String,
    pub purpose: CodePurpose,
    pub verified: bool,
}

impl From<VerifyCodeResult> for VerifyCodeResponse {
    fn from(result: VerifyCodeResult) -> Self {
        Self {
            email: result.email,
            purpose: result.purpose,
            verified: result.verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStatusResponse {
    pub email: String,
    pub has_active_code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<CodePurpose>,
}

impl CodeStatusResponse {
    pub fn new(email: String, status: Option<CodeStatus>) -> Self {
        match status {
            Some(status) => Self {
                email,
                has_active_code: true,
                expires_in_seconds: Some(status.expires_in_seconds),
                attempts_used: Some(status.attempts_used),
                max_attempts: Some(status.max_attempts),
                purpose: Some(status.purpose),
            },
            None => Self {
                email,
                has_active_code: false,
                expires_in_seconds: None,
                attempts_used: None,
                max_attempts: None,
                purpose: None,
            },
        }
    }
}
