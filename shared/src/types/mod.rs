//! Type definitions shared across crates
//!
//! - `response` - API response envelope and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus};
