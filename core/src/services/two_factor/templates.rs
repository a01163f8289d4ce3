//! Verification email templates

use crate::domain::entities::verification_code::{CodePurpose, CODE_LENGTH};

/// Rendered verification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

pub fn purpose_title(purpose: CodePurpose) -> &'static str {
    match purpose {
        CodePurpose::Registration => "Complete Your Registration",
        CodePurpose::Login => "Login Verification",
        CodePurpose::Verification => "Email Verification",
    }
}

pub fn purpose_message(purpose: CodePurpose) -> &'static str {
    match purpose {
        CodePurpose::Registration => {
            "Welcome to Raven AI! Please verify your email to complete your registration."
        }
        CodePurpose::Login => {
            "A login attempt was made to your Raven AI account. Please verify it's you."
        }
        CodePurpose::Verification => "Please verify your email address for Raven AI.",
    }
}

const STYLE: &str = r#"
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333333; background-color: #f5f5f5; margin: 0; padding: 0; }
    .container { max-width: 600px; margin: 0 auto; background-color: #ffffff; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; }
    .header h1 { margin: 0; font-size: 28px; font-weight: 600; }
    .content { padding: 40px 30px; text-align: center; }
    .verification-code { background-color: #f8f9fa; border: 2px dashed #83BAFF; border-radius: 8px; padding: 20px; margin: 30px 0; font-size: 36px; font-weight: bold; letter-spacing: 8px; color: #2c3e50; font-family: 'Courier New', monospace; }
    .warning { background-color: #fff3cd; border-left: 4px solid #ffc107; padding: 15px; margin: 20px 0; border-radius: 4px; }
    .footer { background-color: #f8f9fa; padding: 20px 30px; text-align: center; font-size: 14px; color: #6c757d; border-top: 1px solid #e9ecef; }
"#;

/// Renders subject, HTML and plain-text bodies for a code
pub fn render_verification_email(
    service_name: &str,
    support_email: &str,
    code: &str,
    purpose: CodePurpose,
    expiry_minutes: i64,
) -> VerificationEmail {
    let title = purpose_title(purpose);
    let message = purpose_message(purpose);
    let subject = format!("{} - {}", service_name, title);

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{service_name}</h1>
      <p>{title}</p>
    </div>
    <div class="content">
      <h2>Verification Code</h2>
      <p>{message}</p>
      <div class="verification-code">{code}</div>
      <p>Enter this {length}-digit code to continue. This code will expire in {expiry_minutes} minutes.</p>
      <div class="warning">
        <strong>Security Notice:</strong> If you didn't request this code, please ignore this email or contact support if you're concerned about your account security.
      </div>
    </div>
    <div class="footer">
      <p>This email was sent by {service_name}</p>
      <p>If you have any questions, contact us at {support_email}</p>
    </div>
  </div>
</body>
</html>
"#,
        title = title,
        style = STYLE,
        service_name = service_name,
        message = message,
        code = code,
        length = CODE_LENGTH,
        expiry_minutes = expiry_minutes,
        support_email = support_email,
    );

    let text_body = format!(
        "{service_name} - {title}\n\n\
         {message}\n\n\
         Verification Code: {code}\n\n\
         Enter this {length}-digit code to continue. This code will expire in {expiry_minutes} minutes.\n\n\
         Security Notice: If you didn't request this code, please ignore this email or contact support.\n\n\
         Best regards,\n\
         {service_name} Team\n",
        service_name = service_name,
        title = title,
        message = message,
        code = code,
        length = CODE_LENGTH,
        expiry_minutes = expiry_minutes,
    );

    VerificationEmail {
        subject,
        html_body,
        text_body,
    }
}
