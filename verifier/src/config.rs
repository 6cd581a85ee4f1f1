//! Environment-driven configuration for the verifier binary.

use std::env;
use std::io;
use std::net::IpAddr;

/// Runtime configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    host: IpAddr,
    port: u16,
    paystack_secret_key: Option<String>,
    paystack_api_url: String,
    expose_error_details: bool,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// A missing `PAYSTACK_SECRET_KEY` is not fatal here: the server starts
    /// and reports a configuration error on every verification request, so
    /// the operator sees the failure where it matters.
    pub fn load() -> Result<Self, io::Error> {
        let host = parse_host(env::var("HOST").ok().as_deref())?;
        let port = parse_port(env::var("PORT").ok().as_deref())?;

        let paystack_secret_key = env::var("PAYSTACK_SECRET_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let paystack_api_url = env::var("PAYSTACK_API_URL")
            .unwrap_or_else(|_| womate_paystack::DEFAULT_BASE_URL.to_string());

        let expose_error_details = parse_bool(
            env::var("VERIFY_EXPOSE_ERROR_DETAILS")
                .as_deref()
                .unwrap_or("false"),
        );

        Ok(Self {
            host,
            port,
            paystack_secret_key,
            paystack_api_url,
            expose_error_details,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn paystack_secret_key(&self) -> Option<&str> {
        self.paystack_secret_key.as_deref()
    }

    pub fn paystack_api_url(&self) -> &str {
        &self.paystack_api_url
    }

    pub fn expose_error_details(&self) -> bool {
        self.expose_error_details
    }
}

fn parse_host(raw: Option<&str>) -> Result<IpAddr, io::Error> {
    raw.unwrap_or("0.0.0.0").parse().map_err(|error| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid HOST: {error}"))
    })
}

fn parse_port(raw: Option<&str>) -> Result<u16, io::Error> {
    raw.unwrap_or("3000").parse().map_err(|error| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid PORT: {error}"))
    })
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on" | "enabled"
    )
}
