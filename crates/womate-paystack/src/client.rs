//! HTTP client for Paystack's transaction-verify endpoint.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::PaystackError;
use crate::transaction::{Transaction, VerifyEnvelope};

/// Paystack's production API base.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only lookup of a transaction by its gateway reference.
///
/// [`PaystackClient`] is the production implementation; tests substitute a
/// mock to exercise the verifier without network access.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    async fn verify_transaction(&self, reference: &str) -> Result<Transaction, PaystackError>;
}

/// Client for Paystack's REST API, bearer-authenticated with a server-held
/// secret key. The key is never exposed to callers.
#[derive(Clone, Debug)]
pub struct PaystackClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            secret_key: secret_key.into(),
        }
    }

    /// Overrides the API base, e.g. to point at a sandbox.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TransactionLookup for PaystackClient {
    async fn verify_transaction(&self, reference: &str) -> Result<Transaction, PaystackError> {
        let url = format!(
            "{}/transaction/verify/{}",
            self.base_url.trim_end_matches("/"),
            reference
        );
        tracing::debug!(reference, "looking up transaction on Paystack");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let http_ok = response.status().is_success();
        let http_status = response.status();
        let body = response.text().await?;

        let envelope: VerifyEnvelope = serde_json::from_str(&body).map_err(|error| {
            if http_ok {
                PaystackError::InvalidResponse(format!("invalid JSON from Paystack: {error}"))
            } else {
                PaystackError::Rejected {
                    message: format!("Paystack returned status {http_status}"),
                }
            }
        })?;

        interpret_envelope(http_ok, envelope)
    }
}

/// Turns a decoded envelope into a transaction or a rejection.
///
/// A non-2xx response or a `status: false` envelope is a rejection carrying
/// the gateway's message; a success envelope without `data` is a decoding
/// failure, not a rejection.
fn interpret_envelope(
    http_ok: bool,
    envelope: VerifyEnvelope,
) -> Result<Transaction, PaystackError> {
    if !http_ok || !envelope.status {
        let message = envelope
            .message
            .unwrap_or_else(|| "Transaction not found".to_string());
        return Err(PaystackError::Rejected { message });
    }
    envelope.data.ok_or_else(|| {
        PaystackError::InvalidResponse(
            "verification envelope is missing transaction data".to_string(),
        )
    })
}
