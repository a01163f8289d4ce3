//! Shared response builders used by the route handlers

pub mod error;

pub use error::{
    internal_error_response, json_error_handler, not_found, two_factor_error_response,
    validation_error_response,
};
