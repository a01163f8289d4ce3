use actix_web::{web, HttpResponse};
use validator::Validate;

use raven_core::services::two_factor::EmailSenderTrait;
use raven_shared::utils::validation::mask_email;
use raven_shared::ApiResponse;

use crate::dto::{CodeStatusRequest, CodeStatusResponse};
use crate::handlers::{internal_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/auth/2fa-code-status
///
/// Reports whether a live code exists for the email and, if so, how long it
/// has left and how many attempts were used. Never reveals the code.
pub async fn code_status<E>(
    state: web::Data<AppState<E>>,
    request: web::Json<CodeStatusRequest>,
) -> HttpResponse
where
    E: EmailSenderTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = request.normalized_email();

    match state.two_factor_service.get_code_status(&email).await {
        Ok(status) => {
            let message = if status.is_some() {
                "Code status retrieved"
            } else {
                "No active code found"
            };
            HttpResponse::Ok().json(ApiResponse::success(
                message,
                CodeStatusResponse::new(email, status),
            ))
        }
        Err(error) => {
            tracing::error!(email = %mask_email(&email), error = %error, "Failed to read code status");
            internal_error_response()
        }
    }
}
