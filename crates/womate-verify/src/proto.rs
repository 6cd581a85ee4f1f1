//! Wire types for the verification endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use womate_paystack::Transaction;

use crate::verifier::VerifyError;

/// Inbound body of `POST /api/verify-payment`.
///
/// Every field is optional at the serde layer; [`VerificationRequest::validate`]
/// enforces which are required and coerces `expected_amount` to an integer
/// minor-unit value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationRequest {
    /// Gateway transaction reference to verify.
    #[serde(default)]
    pub reference: Option<String>,

    /// Claimed amount in minor units (pesewas). Accepted as a JSON integer
    /// or an integer-valued string; anything else fails validation.
    #[serde(default)]
    pub expected_amount: Option<Value>,

    /// When present, must match the gateway's customer email.
    #[serde(default)]
    pub email: Option<String>,

    /// Reserved for a future replay-prevention mechanism; currently ignored.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// A validated request: required fields present, amount coerced.
#[derive(Debug, Clone)]
pub struct ValidRequest {
    pub reference: String,
    pub expected_amount: i64,
    pub email: Option<String>,
}

impl VerificationRequest {
    /// Validates the request without contacting the gateway.
    ///
    /// An empty or whitespace-only `reference` counts as missing. A present
    /// but non-integer `expected_amount` is rejected rather than coerced.
    pub fn validate(&self) -> Result<ValidRequest, VerifyError> {
        let reference = self
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|reference| !reference.is_empty());

        let (Some(reference), Some(expected_amount)) = (reference, self.expected_amount.as_ref())
        else {
            return Err(VerifyError::MissingFields);
        };

        let expected_amount =
            coerce_minor_amount(expected_amount).ok_or(VerifyError::InvalidAmount)?;

        Ok(ValidRequest {
            reference: reference.to_string(),
            expected_amount,
            email: self.email.clone(),
        })
    }
}

fn coerce_minor_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Outcome body returned on 200 (verified) and 400 (rules failed).
///
/// Always echoes the gateway's view of the transaction so the storefront can
/// display what was actually paid, regardless of the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    pub verified: bool,
    /// Paid amount in minor units (pesewas).
    pub amount: i64,
    /// Paid amount in cedis.
    pub amount_ghc: serde_json::Number,
    pub status: String,
    pub email: String,
    pub reference: String,
    pub channel: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub currency: String,
    /// When this outcome was produced.
    pub timestamp: DateTime<Utc>,
    /// Reasons the transaction was rejected, in rule order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl VerificationOutcome {
    pub fn new(
        transaction: &Transaction,
        reference: &str,
        failures: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let verified = failures.is_empty();
        Self {
            verified,
            amount: transaction.amount,
            amount_ghc: major_units(transaction.amount),
            status: transaction.status.clone(),
            email: transaction.customer.email.clone(),
            reference: reference.to_string(),
            channel: transaction.channel.clone(),
            paid_at: transaction.paid_at,
            currency: transaction.currency.clone(),
            timestamp: now,
            errors: (!verified).then_some(failures),
        }
    }
}

/// Body for 4xx/5xx responses that carry no transaction data.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub verified: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            verified: false,
            error: error.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Minor-to-major unit conversion.
///
/// Serializes as a JSON integer when the minor amount divides evenly by 100
/// and as a decimal otherwise, matching what the storefront expects.
pub fn major_units(minor: i64) -> serde_json::Number {
    if minor % 100 == 0 {
        serde_json::Number::from(minor / 100)
    } else {
        serde_json::Number::from_f64(minor as f64 / 100.0)
            .unwrap_or_else(|| serde_json::Number::from(minor / 100))
    }
}

/// Formats a minor-unit amount in cedis for human-readable messages.
pub fn format_major(minor: i64) -> String {
    major_units(minor).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use womate_paystack::Customer;

    fn transaction() -> Transaction {
        Transaction {
            amount: 10000,
            status: "success".to_string(),
            customer: Customer {
                email: "customer@email.com".to_string(),
            },
            channel: Some("mobile_money".to_string()),
            paid_at: Some(Utc::now()),
            currency: "GHS".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_integer_amount() {
        let request = VerificationRequest {
            reference: Some("ref_1".to_string()),
            expected_amount: Some(json!(10000)),
            ..Default::default()
        };
        let valid = request.validate().unwrap();
        assert_eq!(valid.reference, "ref_1");
        assert_eq!(valid.expected_amount, 10000);
    }

    #[test]
    fn test_validate_accepts_numeric_string_amount() {
        let request = VerificationRequest {
            reference: Some("ref_1".to_string()),
            expected_amount: Some(json!("9999")),
            ..Default::default()
        };
        assert_eq!(request.validate().unwrap().expected_amount, 9999);
    }

    #[test]
    fn test_validate_rejects_non_numeric_amount() {
        let request = VerificationRequest {
            reference: Some("ref_1".to_string()),
            expected_amount: Some(json!("ten cedis")),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(VerifyError::InvalidAmount)
        ));
    }

    #[test]
    fn test_validate_rejects_fractional_amount() {
        let request = VerificationRequest {
            reference: Some("ref_1".to_string()),
            expected_amount: Some(json!(99.5)),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(VerifyError::InvalidAmount)
        ));
    }

    #[test]
    fn test_validate_requires_reference() {
        let request = VerificationRequest {
            reference: Some("   ".to_string()),
            expected_amount: Some(json!(10000)),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(VerifyError::MissingFields)
        ));
    }

    #[test]
    fn test_validate_requires_expected_amount() {
        let request = VerificationRequest {
            reference: Some("ref_1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(VerifyError::MissingFields)
        ));
    }

    #[test]
    fn test_zero_amount_counts_as_present() {
        let request = VerificationRequest {
            reference: Some("ref_1".to_string()),
            expected_amount: Some(json!(0)),
            ..Default::default()
        };
        assert_eq!(request.validate().unwrap().expected_amount, 0);
    }

    #[test]
    fn test_major_units_even_amount_is_integer() {
        let value = serde_json::to_value(major_units(10000)).unwrap();
        assert_eq!(value, json!(100));
    }

    #[test]
    fn test_major_units_uneven_amount_is_decimal() {
        assert_eq!(format_major(9999), "99.99");
        assert_eq!(format_major(10000), "100");
    }

    #[test]
    fn test_verified_outcome_omits_errors_key() {
        let outcome =
            VerificationOutcome::new(&transaction(), "ref_1", Vec::new(), Utc::now());
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["verified"], json!(true));
        assert_eq!(body["amount"], json!(10000));
        assert_eq!(body["amount_ghc"], json!(100));
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn test_failed_outcome_carries_reasons_in_order() {
        let failures = vec!["first".to_string(), "second".to_string()];
        let outcome = VerificationOutcome::new(&transaction(), "ref_1", failures, Utc::now());
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["verified"], json!(false));
        assert_eq!(body["errors"], json!(["first", "second"]));
    }

    #[test]
    fn test_error_body_omits_absent_fields() {
        let body = serde_json::to_value(ErrorBody::new("Method not allowed")).unwrap();
        assert_eq!(body, json!({ "verified": false, "error": "Method not allowed" }));
    }
}
