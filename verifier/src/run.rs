//! WOMATE payment verifier HTTP server entrypoint.
//!
//! This module initializes and runs the Axum-based HTTP server that verifies
//! client payment claims against Paystack before the storefront treats a
//! transaction as legitimate.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/verify-payment` | Verify a transaction reference against Paystack |
//! | `GET` | `/health` | Health check endpoint |
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: `0.0.0.0`)
//! - `PORT` - Server port (default: `3000`)
//! - `PAYSTACK_SECRET_KEY` - Secret key used for Paystack transaction lookups
//! - `PAYSTACK_API_URL` - Override for the Paystack API base (default: `https://api.paystack.co`)
//! - `VERIFY_CORS_ALLOWED_ORIGINS` - comma-separated CORS allowlist, or `*` to allow all
//! - `VERIFY_EXPOSE_ERROR_DETAILS` - echo internal error detail to callers (keep off outside development)
//! - `RUST_LOG` - tracing filter (default: `info`)

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use dotenvy::dotenv;
use tower_http::cors;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use womate_paystack::PaystackClient;
use womate_verify::util::SigDown;
use womate_verify::{PaymentVerifier, handlers};

use crate::config::Config;

fn build_cors_layer() -> Result<cors::CorsLayer, io::Error> {
    let raw = std::env::var("VERIFY_CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let base = cors::CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(cors::Any);

    if raw.trim() == "*" {
        return Ok(base.allow_origin(cors::Any));
    }

    let origins: Vec<HeaderValue> = raw
        .split(",")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid VERIFY_CORS_ALLOWED_ORIGINS: {e}"),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "VERIFY_CORS_ALLOWED_ORIGINS is empty",
        ));
    }

    Ok(base.allow_origin(origins))
}

/// Initializes the payment verifier server.
///
/// - Loads `.env` variables.
/// - Initializes tracing.
/// - Builds the Paystack client from the configured secret key.
/// - Starts an Axum HTTP server with the verification handlers.
///
/// Binds to the address specified by the `HOST` and `PORT` env vars.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let gateway = config
        .paystack_secret_key()
        .map(|key| PaystackClient::new(key).with_base_url(config.paystack_api_url()));
    if gateway.is_none() {
        tracing::warn!(
            "PAYSTACK_SECRET_KEY is not set; verification requests will fail until it is configured"
        );
    }

    let verifier =
        PaymentVerifier::new(gateway).with_error_details(config.expose_error_details());
    let axum_state = Arc::new(verifier);

    let http_endpoints = Router::new()
        .merge(handlers::routes().with_state(axum_state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer()?);

    let addr = SocketAddr::new(config.host(), config.port());
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    let sig_down = SigDown::try_new()?;
    let axum_cancellation_token = sig_down.cancellation_token();
    let axum_graceful_shutdown = async move { axum_cancellation_token.cancelled().await };
    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(axum_graceful_shutdown)
        .await?;

    Ok(())
}
