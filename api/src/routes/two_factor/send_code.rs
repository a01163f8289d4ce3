use actix_web::{web, HttpResponse};
use validator::Validate;

use raven_core::services::two_factor::EmailSenderTrait;
use raven_shared::utils::validation::mask_email;
use raven_shared::ApiResponse;

use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{two_factor_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/auth/send-2fa-code
///
/// Sends a 6-digit verification code to the given email address.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "purpose": "login"
/// }
/// ```
///
/// `purpose` is optional and defaults to `verification`.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification code sent successfully",
///     "data": {
///         "email": "alice@example.com",
///         "purpose": "login",
///         "expires_in_minutes": 10
///     }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid email or purpose
/// - 429 Too Many Requests: cooldown active or hourly cap reached
/// - 503 Service Unavailable: the email could not be delivered
pub async fn send_code<E>(
    state: web::Data<AppState<E>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    E: EmailSenderTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = request.normalized_email();
    let purpose = request.purpose();

    match state
        .two_factor_service
        .send_verification_code(&email, purpose)
        .await
    {
        Ok(result) => {
            tracing::debug!(email = %mask_email(&email), purpose = %purpose, "send-2fa-code succeeded");
            let message = result.message.clone();
            HttpResponse::Ok().json(ApiResponse::success(message, SendCodeResponse::from(result)))
        }
        Err(error) => two_factor_error_response(&error),
    }
}
