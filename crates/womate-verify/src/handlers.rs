//! Axum handlers for the verification endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use womate_paystack::TransactionLookup;

use crate::proto::{ErrorBody, VerificationRequest};
use crate::verifier::{PaymentVerifier, VerifyError};

/// Routes served by the verifier.
///
/// Methods other than `POST` on the verification endpoint get a structured
/// 405 body; the CORS preflight `OPTIONS` is answered by the CORS layer the
/// binary installs on top of these routes.
pub fn routes<G>() -> Router<Arc<PaymentVerifier<G>>>
where
    G: TransactionLookup + 'static,
{
    Router::new()
        .route("/api/verify-payment", post(verify_payment::<G>))
        .route("/health", get(health))
        .method_not_allowed_fallback(method_not_allowed)
}

async fn health() -> &'static str {
    "OK"
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
        .into_response()
}

async fn verify_payment<G>(
    State(verifier): State<Arc<PaymentVerifier<G>>>,
    body: Result<Json<VerificationRequest>, JsonRejection>,
) -> Response
where
    G: TransactionLookup,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("Invalid request body").with_message(rejection.body_text())),
            )
                .into_response();
        }
    };

    match verifier.verify(&request).await {
        Ok(outcome) => {
            let status = if outcome.verified {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, Json(outcome)).into_response()
        }
        Err(error) => error_response(error, verifier.expose_error_details()),
    }
}

fn error_response(error: VerifyError, expose_details: bool) -> Response {
    let (status, body) = match &error {
        VerifyError::MissingFields | VerifyError::InvalidAmount => {
            (StatusCode::BAD_REQUEST, ErrorBody::new(error.to_string()))
        }
        VerifyError::Configuration => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new(error.to_string()),
        ),
        VerifyError::UpstreamRejected(message) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("Invalid payment reference").with_message(message.clone()),
        ),
        VerifyError::Unexpected(detail) => {
            tracing::error!(detail = %detail, "verification error");
            let mut body = ErrorBody::new("Payment verification failed").with_message(
                "An unexpected error occurred. Please try again or contact support.",
            );
            if expose_details {
                body = body.with_details(detail.clone());
            }
            (StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    };
    (status, Json(body)).into_response()
}
