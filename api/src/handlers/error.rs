use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use raven_core::errors::TwoFactorError;
use raven_shared::{error_codes, ApiResponse};

/// HTTP status for each two-factor failure
pub fn status_for(error: &TwoFactorError) -> StatusCode {
    match error {
        TwoFactorError::CooldownActive { .. } | TwoFactorError::HourlyLimitExceeded => {
            StatusCode::TOO_MANY_REQUESTS
        }
        TwoFactorError::DeliveryFailed => StatusCode::SERVICE_UNAVAILABLE,
        TwoFactorError::Expired => StatusCode::GONE,
        TwoFactorError::AttemptsExceeded | TwoFactorError::AttemptsExhausted => {
            StatusCode::TOO_MANY_REQUESTS
        }
        TwoFactorError::NotFound => StatusCode::NOT_FOUND,
        TwoFactorError::PurposeMismatch
        | TwoFactorError::Mismatch { .. }
        | TwoFactorError::VerificationFailed => StatusCode::BAD_REQUEST,
    }
}

/// Convert a two-factor failure into the `{success:false, message, error}` body
pub fn two_factor_error_response(error: &TwoFactorError) -> HttpResponse {
    let mut builder = HttpResponse::build(status_for(error));
    if let Some(seconds) = error.retry_after_seconds() {
        builder.insert_header((header::RETRY_AFTER, seconds.to_string()));
    }
    builder.json(ApiResponse::error(error.error_code(), error.to_string()))
}

/// 400 `VALIDATION_ERROR` carrying every field message, sorted by field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    HttpResponse::BadRequest().json(ApiResponse::error(error_codes::VALIDATION_ERROR, message))
}

pub fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error(
        error_codes::INTERNAL_ERROR,
        "Internal server error. Please try again later",
    ))
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

/// Turns JSON extractor failures into a 400 envelope instead of actix's plain text
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected malformed JSON body");
    let response = HttpResponse::BadRequest().json(ApiResponse::error(
        error_codes::VALIDATION_ERROR,
        format!("Invalid request body: {}", err),
    ));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&TwoFactorError::CooldownActive { retry_after_seconds: 30 }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(status_for(&TwoFactorError::HourlyLimitExceeded), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&TwoFactorError::DeliveryFailed), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&TwoFactorError::Expired), StatusCode::GONE);
        assert_eq!(status_for(&TwoFactorError::AttemptsExceeded), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&TwoFactorError::AttemptsExhausted), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&TwoFactorError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&TwoFactorError::PurposeMismatch), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&TwoFactorError::Mismatch { remaining: 1 }), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&TwoFactorError::VerificationFailed), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_cooldown_response_carries_retry_after() {
        let response =
            two_factor_error_response(&TwoFactorError::CooldownActive { retry_after_seconds: 42 });

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
        assert_eq!(body["message"], "Please wait 42 seconds before requesting a new code");
    }

    #[actix_web::test]
    async fn test_hourly_cap_has_no_retry_after() {
        let response = two_factor_error_response(&TwoFactorError::HourlyLimitExceeded);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[actix_web::test]
    async fn test_not_found_body() {
        let body = body_json(not_found().await).await;
        assert_eq!(body["error"], "NOT_FOUND");
        assert!(body.get("data").is_none());
    }
}
