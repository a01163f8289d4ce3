//! HTTP surface of the Raven AI two-factor service
//!
//! Exposes the route table through [`app::create_app`] so the binary and the
//! integration tests build the same application.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::two_factor::AppState;
