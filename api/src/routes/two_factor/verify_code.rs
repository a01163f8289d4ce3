use actix_web::{web, HttpResponse};
use validator::Validate;

use raven_core::services::two_factor::EmailSenderTrait;
use raven_shared::ApiResponse;

use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{two_factor_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/auth/verify-2fa-code
///
/// Checks a code against the one issued for the email and purpose. A
/// successful check consumes the code.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "code": "123 456",
///     "purpose": "login"
/// }
/// ```
///
/// Spaces and dashes in `code` are ignored.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification successful",
///     "data": { "email": "alice@example.com", "purpose": "login", "verified": true }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: malformed request or wrong code
/// - 404 Not Found: no code was issued
/// - 410 Gone: the code expired
/// - 429 Too Many Requests: attempts used up
pub async fn verify_code<E>(
    state: web::Data<AppState<E>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    E: EmailSenderTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = request.normalized_email();
    let code = request.normalized_code();

    match state
        .two_factor_service
        .verify_code(&email, &code, request.purpose())
        .await
    {
        Ok(result) => {
            let message = result.message.clone();
            HttpResponse::Ok().json(ApiResponse::success(message, VerifyCodeResponse::from(result)))
        }
        Err(error) => two_factor_error_response(&error),
    }
}
