//! Email delivery configuration module

use serde::{Deserialize, Serialize};
use std::env;

use super::environment::Environment;

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Real delivery through an SMTP relay
    Smtp,
    /// Log-only delivery for local development
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailProvider::Smtp => write!(f, "smtp"),
            EmailProvider::Mock => write!(f, "mock"),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub server: String,

    /// Relay port
    pub port: u16,

    /// Login user; authentication is skipped unless both user and password are set
    #[serde(default)]
    pub username: Option<String>,

    /// Login password
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Sender address
    pub from_email: String,

    /// Display name used in the From header
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Upgrade the connection with STARTTLS
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// Upper bound for a single delivery, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            server: String::from("smtp.gmail.com"),
            port: 587,
            username: None,
            password: None,
            from_email: String::from("noreply@ravenai.site"),
            from_name: default_from_name(),
            use_tls: default_use_tls(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SmtpConfig {
    /// Load from the `SMTP_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: env::var("SMTP_SERVER").unwrap_or(defaults.server),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            username: env::var("SMTP_USERNAME").ok().filter(|v| !v.is_empty()),
            password: env::var("SMTP_PASSWORD").ok().filter(|v| !v.is_empty()),
            from_email: env::var("SMTP_FROM_EMAIL").unwrap_or(defaults.from_email),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or(defaults.from_name),
            use_tls: env::var("SMTP_USE_TLS")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.use_tls),
            timeout_seconds: env::var("SMTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
        }
    }

    /// Whether both username and password are present
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Email configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Which provider delivers verification emails
    pub provider: EmailProvider,

    /// SMTP settings (used when provider is `smtp`)
    pub smtp: SmtpConfig,
}

impl EmailConfig {
    /// Default provider for an environment: mock while developing, SMTP elsewhere
    pub fn default_provider(environment: Environment) -> EmailProvider {
        if environment.is_development() {
            EmailProvider::Mock
        } else {
            EmailProvider::Smtp
        }
    }

    /// Load from `EMAIL_PROVIDER` and the `SMTP_*` variables
    pub fn from_env(environment: Environment) -> Self {
        let provider = env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(|| Self::default_provider(environment));

        Self {
            provider,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp: SmtpConfig::default(),
        }
    }
}

fn default_from_name() -> String {
    String::from("Raven AI")
}

fn default_use_tls() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    10
}
