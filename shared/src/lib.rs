//! Shared utilities and common types for the Raven AI server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error codes and the API response envelope
//! - Utility functions (email validation and masking, code normalization)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, EmailConfig, EmailProvider, Environment, LogFormat, LoggingConfig,
    ServerConfig, SmtpConfig,
};
pub use errors::error_codes;
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::validation;
