use actix_web::{web, HttpResponse};

use raven_core::services::two_factor::EmailSenderTrait;
use raven_shared::ApiResponse;

use super::AppState;

/// Handler for GET /api/auth/2fa-info
///
/// Echoes the policy constants so clients can size inputs and timers.
pub async fn two_factor_info<E>(state: web::Data<AppState<E>>) -> HttpResponse
where
    E: EmailSenderTrait + 'static,
{
    HttpResponse::Ok().json(ApiResponse::success(
        "2FA configuration retrieved",
        state.two_factor_service.info(),
    ))
}
