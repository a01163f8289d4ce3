use actix_web::{web, HttpResponse};

use raven_core::services::two_factor::EmailSenderTrait;

use crate::dto::SendCodeRequest;

use super::{send_code::send_code, AppState};

/// Handler for POST /api/auth/resend-2fa-code
///
/// Same contract as `send-2fa-code`. The cooldown and hourly cap apply to
/// resends exactly as they do to the first send.
pub async fn resend_code<E>(
    state: web::Data<AppState<E>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    E: EmailSenderTrait + 'static,
{
    send_code(state, request).await
}
