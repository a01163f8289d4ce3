//! CORS middleware configuration for the browser frontend.
//!
//! Development accepts any origin so local tooling works without setup.
//! Staging and production only accept the origins listed in `CorsConfig`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use raven_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_development() {
        create_development_cors(config)
    } else {
        create_restricted_cors(config)
    }
}

fn base_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(config.max_age);

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring permissive CORS for development");
    base_cors(config).allow_any_origin()
}

fn create_restricted_cors(config: &CorsConfig) -> Cors {
    config
        .allowed_origins
        .iter()
        .fold(base_cors(config), |cors, origin| {
            tracing::info!(origin = %origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_production_allows_configured_origin() {
        let config = CorsConfig::default();
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config, Environment::Production))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://ravenai.site"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://ravenai.site"
        );
    }

    #[actix_web::test]
    async fn test_production_rejects_unknown_origin() {
        let config = CorsConfig::default();
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config, Environment::Production))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;

        // actix-cors rejects the request outright; either way no allow-origin header
        if let Ok(resp) = resp {
            assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        }
    }
}
