//! Checkout-session delegation client
//!
//! The payment flow is owned by an external collaborator; this client only
//! asks it to create a checkout session and hands the resulting URL back
//! to the UI. Failures map to typed errors so the boundary can answer
//! with a proper status instead of a fake success.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CHECKOUT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "TheFinisher/0.1.0";

/// Checkout client errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("payment collaborator not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("payment collaborator returned {0}: {1}")]
    Status(u16, String),

    #[error("invalid collaborator response: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct CheckoutSessionRequest<'a> {
    plan_id: &'a str,
    price_cents: u32,
}

/// Successful checkout session: the UI redirects to `url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

/// HTTP client for the payment collaborator
pub struct CheckoutClient {
    http_client: reqwest::Client,
    endpoint: Option<String>,
}

impl CheckoutClient {
    /// Create a client; `endpoint == None` means the collaborator is not
    /// configured and every session request fails with `NotConfigured`
    pub fn new(endpoint: Option<String>) -> Result<Self, CheckoutError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(CHECKOUT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// Ask the collaborator to create a checkout session for a plan
    pub async fn create_session(
        &self,
        plan_id: &str,
        price_cents: u32,
    ) -> Result<CheckoutSession, CheckoutError> {
        let endpoint = self.endpoint.as_ref().ok_or(CheckoutError::NotConfigured)?;

        tracing::debug!(plan_id, price_cents, "Creating checkout session");

        let response = self
            .http_client
            .post(endpoint)
            .json(&CheckoutSessionRequest {
                plan_id,
                price_cents,
            })
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Status(status.as_u16(), error_text));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| CheckoutError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_reports_not_configured() {
        let client = CheckoutClient::new(None).unwrap();
        match client.create_session("monthly", 3000).await {
            Err(CheckoutError::NotConfigured) => {}
            other => panic!("expected NotConfigured, got {other:?}"),
        }
    }
}
