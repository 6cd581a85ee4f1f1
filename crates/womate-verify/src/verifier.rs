//! The payment verifier: one gateway lookup, trust rules, one verdict.

use chrono::Utc;
use thiserror::Error;
use womate_paystack::{PaystackError, TransactionLookup};

use crate::proto::{VerificationOutcome, VerificationRequest};
use crate::rules;

/// Errors terminal for a single verification request.
///
/// Rule failures are not errors; they surface as `verified: false` inside a
/// [`VerificationOutcome`]. Nothing here is retried; each failure is reported
/// to the caller, who may resubmit.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Required fields absent from the request body. No gateway call is made.
    #[error("Missing required fields: reference and expected_amount")]
    MissingFields,

    /// `expected_amount` present but not coercible to an integer minor-unit
    /// amount. No gateway call is made.
    #[error("expected_amount must be an integer amount in pesewas")]
    InvalidAmount,

    /// The Paystack secret key is not configured. Fatal and non-retryable.
    #[error("Server configuration error - Please contact support")]
    Configuration,

    /// Paystack answered but rejected the reference or returned no
    /// transaction. Carries the gateway's message.
    #[error("{0}")]
    UpstreamRejected(String),

    /// Anything else: transport failure, malformed gateway body.
    #[error("{0}")]
    Unexpected(String),
}

impl From<PaystackError> for VerifyError {
    fn from(error: PaystackError) -> Self {
        match error {
            PaystackError::Rejected { message } => VerifyError::UpstreamRejected(message),
            PaystackError::Transport(error) => VerifyError::Unexpected(error.to_string()),
            PaystackError::InvalidResponse(detail) => VerifyError::Unexpected(detail),
        }
    }
}

/// Verifies client payment claims against Paystack's record.
///
/// The gateway client is injected at construction. A verifier built without
/// one (secret key absent from the environment) fails every call with
/// [`VerifyError::Configuration`] and never contacts the gateway, so the
/// misconfiguration is visible on each request instead of crashing the
/// process at startup.
pub struct PaymentVerifier<G> {
    gateway: Option<G>,
    expose_error_details: bool,
}

impl<G> PaymentVerifier<G> {
    pub fn new(gateway: Option<G>) -> Self {
        Self {
            gateway,
            expose_error_details: false,
        }
    }

    /// Echo internal error detail to callers. Keep disabled outside
    /// development.
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    pub fn expose_error_details(&self) -> bool {
        self.expose_error_details
    }
}

impl<G: TransactionLookup> PaymentVerifier<G> {
    /// Verifies one payment claim end to end.
    ///
    /// Validates the request, fetches the transaction from Paystack, and
    /// evaluates the trust rules. Returns an outcome for well-formed requests
    /// (verified or not) and an error otherwise.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerifyError> {
        let request = request.validate()?;

        let gateway = self.gateway.as_ref().ok_or_else(|| {
            tracing::error!("PAYSTACK_SECRET_KEY is not configured");
            VerifyError::Configuration
        })?;

        tracing::info!(
            reference = %request.reference,
            email = request.email.as_deref().unwrap_or(""),
            "verifying payment"
        );

        let transaction = gateway.verify_transaction(&request.reference).await?;

        let now = Utc::now();
        let failures = rules::evaluate(&transaction, &request, now);

        if failures.is_empty() {
            tracing::info!(
                reference = %request.reference,
                email = %transaction.customer.email,
                amount = transaction.amount,
                "payment verified"
            );
        } else {
            tracing::warn!(
                reference = %request.reference,
                reasons = ?failures,
                "payment verification failed"
            );
        }

        Ok(VerificationOutcome::new(
            &transaction,
            &request.reference,
            failures,
            now,
        ))
    }
}
