//! Error taxonomy for Paystack lookups.

use thiserror::Error;

/// Errors returned by the Paystack client.
#[derive(Debug, Error)]
pub enum PaystackError {
    /// The HTTP request could not be completed.
    #[error("Paystack request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Paystack answered but declined the lookup or returned no transaction.
    ///
    /// Carries the gateway's own message where available, so callers can
    /// surface it to the end user.
    #[error("{message}")]
    Rejected { message: String },

    /// Paystack answered with a body this client cannot interpret.
    #[error("unexpected response from Paystack: {0}")]
    InvalidResponse(String),
}
