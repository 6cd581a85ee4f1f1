//! Payment verification for the WOMATE storefront.
//!
//! This crate provides [`PaymentVerifier`], which reconciles a client-supplied
//! transaction reference and claimed amount against Paystack's authoritative
//! record and produces a trust verdict. A transaction is reported as verified
//! only when every trust rule passes against freshly fetched gateway data;
//! client-supplied amounts, statuses, and emails are never trusted on their
//! own.
//!
//! This crate provides:
//! - route-level error handling via Axum handlers
//! - request validation and minor-unit amount coercion
//! - the trust rules applied to a fetched transaction, with every failure
//!   collected rather than just the first

pub mod handlers;
pub mod proto;
pub mod rules;
pub mod util;
pub mod verifier;

pub use handlers::*;
pub use proto::*;
pub use verifier::*;
