//! # Raven Core
//!
//! Core business logic and domain layer for the Raven AI two-factor service.
//! This crate contains the verification entities, the code store, the rate
//! limiter, the orchestrating service and its background reaper, and the
//! error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
