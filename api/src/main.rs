use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use raven_api::{create_app, AppState};
use raven_core::services::two_factor::{ExpiryReaper, TwoFactorConfig, TwoFactorService};
use raven_infra::email::create_email_sender;
use raven_shared::{AppConfig, LogFormat, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        email_provider = %config.email.provider,
        "Starting Raven AI API server"
    );

    let email_sender = Arc::new(create_email_sender(&config.email));
    tracing::info!(
        provider = email_sender.provider_name(),
        timeout_secs = email_sender.timeout().as_secs(),
        "Email delivery configured"
    );

    let two_factor_config = TwoFactorConfig::default();
    let sweep_interval = two_factor_config.sweep_interval();
    let service = Arc::new(TwoFactorService::new(email_sender, two_factor_config));
    let reaper = ExpiryReaper::start(service.clone(), sweep_interval);

    let app_state = web::Data::new(AppState::new(service));
    let cors_config = config.cors.clone();
    let environment = config.environment;
    let bind_address = config.server.bind_address();

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, environment)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    tracing::info!(address = %bind_address, "Listening");
    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error");

    reaper.shutdown().await;
    tracing::info!("Raven AI API server stopped");

    result
}
