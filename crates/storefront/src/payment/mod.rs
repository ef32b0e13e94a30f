//! Payment collaborator seam.
//!
//! The checkout flow dispatches exactly one charge per attempt through the
//! [`PaymentGateway`] trait. Implementations: [`ProcessorClient`] for the
//! live processor and [`DemoGateway`] for environments without live payment
//! credentials.

mod demo;
mod processor;

pub use demo::DemoGateway;
pub use processor::ProcessorClient;

use async_trait::async_trait;
use encore_core::CurrencyCode;
use serde::Serialize;
use thiserror::Error;

use crate::checkout::ShippingDetails;
use crate::config::PaymentConfig;

/// Typed failures from the payment collaborator.
///
/// Every variant is recoverable: the checkout flow surfaces the message and
/// returns to the form with the cart untouched.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor declined the charge.
    #[error("charge declined: {reason}")]
    Declined {
        /// Processor-reported decline reason.
        reason: String,
    },

    /// The charge never completed (transport fault, processor unavailable).
    #[error("payment network error: {0}")]
    Network(String),

    /// The processor rejected the request as malformed.
    #[error("payment request rejected: {message}")]
    Invalid {
        /// Processor-reported validation message.
        message: String,
    },
}

impl From<reqwest::Error> for PaymentError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// A charge to dispatch to the processor.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    /// Amount in the currency's minor unit (e.g., cents).
    pub amount_minor: i64,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
    /// Statement/display description for the charge.
    pub description: String,
    /// Validated billing/shipping details.
    pub shipping: ShippingDetails,
}

/// Successful charge confirmation.
#[derive(Debug, Clone)]
pub struct ChargeConfirmation {
    /// Processor-assigned confirmation identifier.
    pub confirmation_id: String,
    /// Amount actually charged, in minor units.
    pub amount_minor: i64,
}

/// A collaborator that can confirm or decline a charge.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Dispatch a single charge attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] describing the decline, transport fault,
    /// or processor-side validation rejection.
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeConfirmation, PaymentError>;
}

/// Build the configured payment gateway.
#[must_use]
pub fn gateway_from_config(config: &PaymentConfig) -> Box<dyn PaymentGateway> {
    match config {
        PaymentConfig::Demo { delay } => Box::new(DemoGateway::new(*delay)),
        PaymentConfig::Live(processor) => Box::new(ProcessorClient::new(processor)),
    }
}
