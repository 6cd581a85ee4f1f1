//! Trust rules applied to a fetched transaction.
//!
//! Rules are evaluated independently and every failure is collected, so the
//! caller sees all reasons a transaction was rejected rather than just the
//! first.

use chrono::{DateTime, Duration, Utc};
use womate_paystack::Transaction;

use crate::proto::{ValidRequest, format_major};

/// The only settlement currency the storefront accepts.
pub const EXPECTED_CURRENCY: &str = "GHS";

/// Transactions older than this are refused even when otherwise valid.
pub const MAX_PAYMENT_AGE_HOURS: i64 = 24;

/// Status a completed Paystack transaction reports.
pub const SUCCESS_STATUS: &str = "success";

/// Evaluates every trust rule against the gateway's record.
///
/// Returns the failure reasons in rule order; an empty vector means the
/// transaction is verified. A missing `paid_at` fails the freshness rule,
/// since freshness cannot be established without a timestamp.
pub fn evaluate(
    transaction: &Transaction,
    request: &ValidRequest,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut failures = Vec::new();

    if transaction.status != SUCCESS_STATUS {
        failures.push(format!(
            "Payment status is '{}', not '{SUCCESS_STATUS}'",
            transaction.status
        ));
    }

    if transaction.amount != request.expected_amount {
        failures.push(format!(
            "Amount mismatch: Expected GHS {}, got GHS {}",
            format_major(request.expected_amount),
            format_major(transaction.amount),
        ));
    }

    if let Some(email) = request.email.as_deref() {
        if transaction.customer.email.to_lowercase() != email.to_lowercase() {
            failures.push("Email mismatch".to_string());
        }
    }

    let fresh = transaction.paid_at.is_some_and(|paid_at| {
        now.signed_duration_since(paid_at) <= Duration::hours(MAX_PAYMENT_AGE_HOURS)
    });
    if !fresh {
        failures.push(format!(
            "Payment is too old (more than {MAX_PAYMENT_AGE_HOURS} hours)"
        ));
    }

    if transaction.currency != EXPECTED_CURRENCY {
        failures.push(format!(
            "Invalid currency: {} (expected {EXPECTED_CURRENCY})",
            transaction.currency
        ));
    }

    failures
}
