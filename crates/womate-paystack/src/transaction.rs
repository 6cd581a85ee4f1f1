//! Wire types for Paystack's transaction-verify response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /transaction/verify/:reference`.
///
/// Paystack wraps every response in `{ status, message, data }`. The
/// top-level `status` reports whether the lookup itself succeeded; the
/// transaction's own outcome lives in `data.status`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEnvelope {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Transaction>,
}

/// A transaction record as reported by Paystack.
///
/// `amount` is in the minor currency unit (pesewas for GHS). `paid_at` is
/// null for attempts that never completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: i64,
    pub status: String,
    pub customer: Customer,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub currency: String,
}

/// Customer details attached to a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_BODY: &str = r#"{
        "status": true,
        "message": "Verification successful",
        "data": {
            "id": 4099260516,
            "domain": "live",
            "status": "success",
            "reference": "re4lyvq3s3",
            "amount": 10000,
            "gateway_response": "Successful",
            "paid_at": "2024-08-22T09:15:02.000Z",
            "created_at": "2024-08-22T09:14:24.000Z",
            "channel": "mobile_money",
            "currency": "GHS",
            "customer": {
                "id": 181873746,
                "email": "customer@email.com",
                "customer_code": "CUS_1rkzaqsv4rrhqo6"
            }
        }
    }"#;

    #[test]
    fn test_deserialize_success_envelope() {
        let envelope: VerifyEnvelope = serde_json::from_str(SUCCESS_BODY).unwrap();
        assert!(envelope.status);
        assert_eq!(envelope.message.as_deref(), Some("Verification successful"));

        let transaction = envelope.data.unwrap();
        assert_eq!(transaction.amount, 10000);
        assert_eq!(transaction.status, "success");
        assert_eq!(transaction.customer.email, "customer@email.com");
        assert_eq!(transaction.channel.as_deref(), Some("mobile_money"));
        assert_eq!(transaction.currency, "GHS");
        assert!(transaction.paid_at.is_some());
    }

    #[test]
    fn test_deserialize_null_paid_at() {
        let body = r#"{
            "status": true,
            "message": "Verification successful",
            "data": {
                "status": "abandoned",
                "amount": 10000,
                "paid_at": null,
                "channel": null,
                "currency": "GHS",
                "customer": { "email": "customer@email.com" }
            }
        }"#;
        let envelope: VerifyEnvelope = serde_json::from_str(body).unwrap();
        let transaction = envelope.data.unwrap();
        assert_eq!(transaction.status, "abandoned");
        assert!(transaction.paid_at.is_none());
        assert!(transaction.channel.is_none());
    }

    #[test]
    fn test_deserialize_declined_envelope() {
        let body = r#"{
            "status": false,
            "message": "Transaction reference not found"
        }"#;
        let envelope: VerifyEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.status);
        assert_eq!(
            envelope.message.as_deref(),
            Some("Transaction reference not found")
        );
        assert!(envelope.data.is_none());
    }
}
