//! Domain layer containing the two-factor business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
