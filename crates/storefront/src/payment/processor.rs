//! Live payment processor client.
//!
//! POSTs charges to the processor's endpoint with a secret bearer key and
//! maps the response onto the typed [`PaymentError`] taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use crate::config::ProcessorConfig;

use super::{ChargeConfirmation, ChargeRequest, PaymentError, PaymentGateway};

/// Client for the live payment processor.
#[derive(Clone)]
pub struct ProcessorClient {
    inner: Arc<ProcessorClientInner>,
}

struct ProcessorClientInner {
    client: reqwest::Client,
    endpoint: String,
    secret_key: String,
}

impl ProcessorClient {
    /// Create a new processor client.
    #[must_use]
    pub fn new(config: &ProcessorConfig) -> Self {
        Self {
            inner: Arc::new(ProcessorClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                secret_key: config.secret_key.expose_secret().to_string(),
            }),
        }
    }
}

/// Successful charge body from the processor.
#[derive(Debug, Deserialize)]
struct ChargeResponse {
    id: String,
    status: String,
    #[serde(default)]
    failure_message: Option<String>,
}

/// Error body from the processor.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Extract the processor's error message, falling back to a body snippet.
fn error_message(body: &str) -> String {
    let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    if parsed.error.message.is_empty() {
        body.chars().take(200).collect()
    } else {
        parsed.error.message
    }
}

#[async_trait]
impl PaymentGateway for ProcessorClient {
    #[instrument(skip(self, request), fields(amount_minor = request.amount_minor))]
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeConfirmation, PaymentError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.secret_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let parsed: ChargeResponse =
                serde_json::from_str(&body).map_err(|e| PaymentError::Invalid {
                    message: format!("unreadable processor response: {e}"),
                })?;

            if parsed.status == "succeeded" {
                return Ok(ChargeConfirmation {
                    confirmation_id: parsed.id,
                    amount_minor: request.amount_minor,
                });
            }

            return Err(PaymentError::Declined {
                reason: parsed
                    .failure_message
                    .unwrap_or_else(|| format!("charge status '{}'", parsed.status)),
            });
        }

        match status {
            StatusCode::PAYMENT_REQUIRED => Err(PaymentError::Declined {
                reason: error_message(&body),
            }),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(PaymentError::Invalid {
                    message: error_message(&body),
                })
            }
            other => {
                tracing::error!(
                    status = %other,
                    body = %body.chars().take(500).collect::<String>(),
                    "Processor returned unexpected status"
                );
                Err(PaymentError::Network(format!(
                    "processor returned HTTP {other}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_structured_body() {
        let body = r#"{"error":{"message":"card expired"}}"#;
        assert_eq!(error_message(body), "card expired");
    }

    #[test]
    fn test_error_message_falls_back_to_snippet() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }
}
