//! Paystack transaction lookup for the WOMATE payment verifier.
//!
//! This crate provides [`PaystackClient`], a thin client for Paystack's
//! transaction-verify endpoint, authenticated with a server-held secret key.
//! The lookup is read-only: the client never initiates charges or mutates
//! gateway state.
//!
//! This crate provides:
//! - wire types for Paystack's verification envelope
//! - the [`TransactionLookup`] trait, the seam used to substitute the gateway
//!   in tests
//! - a [`PaystackError`] taxonomy separating rejected references from
//!   transport and decoding failures

pub mod client;
pub mod error;
pub mod transaction;

pub use client::{DEFAULT_BASE_URL, PaystackClient, TransactionLookup};
pub use error::PaystackError;
pub use transaction::{Customer, Transaction, VerifyEnvelope};
