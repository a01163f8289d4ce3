//! Application factory
//!
//! Builds the Actix-web application around an already constructed
//! two-factor service so the binary and the tests share one route table.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use raven_core::services::two_factor::EmailSenderTrait;
use raven_shared::{CorsConfig, Environment, HealthResponse};

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::two_factor::{self, AppState};

pub const SERVICE_NAME: &str = "raven-api";

/// Create and configure the application with all dependencies
pub fn create_app<E>(
    app_state: web::Data<AppState<E>>,
    cors_config: &CorsConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    E: EmailSenderTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Last wrap is outermost, so the request span also covers CORS rejections
        .wrap(create_cors(cors_config, environment))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/auth").configure(two_factor::configure::<E>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
    ))
}
