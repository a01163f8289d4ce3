//! Two-factor route handlers
//!
//! This module contains the email verification code endpoints:
//! - Sending and resending a code
//! - Verifying a code
//! - Inspecting the live code and the policy constants

pub mod code_status;
pub mod info;
pub mod resend_code;
pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use actix_web::web;

use raven_core::services::two_factor::{EmailSenderTrait, TwoFactorService};

/// Application state that holds shared services
pub struct AppState<E>
where
    E: EmailSenderTrait,
{
    pub two_factor_service: Arc<TwoFactorService<E>>,
}

impl<E: EmailSenderTrait> AppState<E> {
    pub fn new(two_factor_service: Arc<TwoFactorService<E>>) -> Self {
        Self { two_factor_service }
    }
}

/// Registers the two-factor endpoints on a scope
pub fn configure<E>(cfg: &mut web::ServiceConfig)
where
    E: EmailSenderTrait + 'static,
{
    cfg.route("/send-2fa-code", web::post().to(send_code::send_code::<E>))
        .route("/verify-2fa-code", web::post().to(verify_code::verify_code::<E>))
        .route("/resend-2fa-code", web::post().to(resend_code::resend_code::<E>))
        .route("/2fa-code-status", web::post().to(code_status::code_status::<E>))
        .route("/2fa-info", web::get().to(info::two_factor_info::<E>));
}
