//! Demo payment path.
//!
//! Bypasses the real processor and always succeeds after a fixed simulated
//! delay. Used in environments without live payment credentials.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::instrument;

use super::{ChargeConfirmation, ChargeRequest, PaymentError, PaymentGateway};

/// A payment gateway that simulates success.
#[derive(Debug, Clone)]
pub struct DemoGateway {
    delay: Duration,
}

impl DemoGateway {
    /// Create a demo gateway with the given simulated round-trip delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Generate a demo confirmation identifier.
fn generate_confirmation_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    let suffix: String = (0..16)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect();
    format!("demo_{suffix}")
}

#[async_trait]
impl PaymentGateway for DemoGateway {
    #[instrument(skip(self, request), fields(amount_minor = request.amount_minor))]
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeConfirmation, PaymentError> {
        tokio::time::sleep(self.delay).await;

        Ok(ChargeConfirmation {
            confirmation_id: generate_confirmation_id(),
            amount_minor: request.amount_minor,
        })
    }
}
