//! Vitrin API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod client_ip;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::io::BufRead;
use std::net::SocketAddr;

use tracing::{error, info};
use vitrin_application::PasswordHasher;
use vitrin_core::AppError;
use vitrin_domain::validate_password;
use vitrin_infrastructure::{Argon2PasswordHasher, RateLimitSweeper};

use crate::api_config::{ApiConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    if env::args().nth(1).as_deref() == Some("hash-password") {
        return hash_password_from_stdin();
    }

    let config = ApiConfig::load()?;
    let app_state = api_services::build_app_state(&config).await?;
    let mut sweeper =
        RateLimitSweeper::new(app_state.rate_limit_service.clone(), config.sweep_interval)?;
    let app = api_router::build_router(app_state, api_services::build_session_layer(&config))?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        site = %config.site_base_url,
        path_mode = config.path_mode.as_str(),
        "vitrin-api listening"
    );

    sweeper.start();
    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|error| AppError::Internal(format!("api server error: {error}")));
    sweeper.stop().await;

    served
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Reads a password from stdin and prints its Argon2id hash for the admin
/// users file.
fn hash_password_from_stdin() -> Result<(), AppError> {
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .map_err(|error| AppError::Internal(format!("failed to read password: {error}")))?;
    let password = password.trim_end_matches(['\r', '\n']);

    validate_password(password)?;
    let hash = Argon2PasswordHasher::new().hash_password(password)?;

    println!("{hash}");
    Ok(())
}
