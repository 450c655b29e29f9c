use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

use lexgate_core::contract::{ApiError, Payments};
use lexgate_core::models::payments::{CaptureParams, Hold, HoldParams};

use crate::config::Configuration;

/// Client for the payments service.
///
/// Hold mutations are retried server-side against an idempotency key, so
/// every mutating call sends a fresh v4 UUID in `Idempotency-Key`.
pub struct PaymentsClient {
    conf: Arc<Configuration>,
}

impl PaymentsClient {
    pub fn new(conf: Arc<Configuration>) -> Self {
        PaymentsClient { conf }
    }
}

#[async_trait]
impl Payments for PaymentsClient {
    async fn create_hold(&self, params: HoldParams) -> Result<Hold, ApiError> {
        tracing::info!(
            amount = params.amount(),
            currency = params.currency(),
            destination_account_id = params.destination_account_id(),
            "Placing hold"
        );
        let request = self
            .conf
            .request(Method::POST, "/v1/payments/holds")
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .json(&params.to_wire());
        let payload = self.conf.execute(request).await?;
        match Hold::from_wire(&payload) {
            Ok(hold) => {
                tracing::info!(
                    hold_id = hold.hold_id(),
                    status = hold.status().as_str(),
                    "Hold placed"
                );
                Ok(hold)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode hold payload");
                Err(Box::new(e))
            }
        }
    }

    async fn capture_hold(&self, hold_id: &str, params: CaptureParams) -> Result<Hold, ApiError> {
        tracing::info!(hold_id, amount = ?params.amount(), "Capturing hold");
        let request = self
            .conf
            .request(Method::POST, &format!("/v1/payments/holds/{hold_id}/capture"))
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .json(&params.to_wire());
        let payload = self.conf.execute(request).await?;
        match Hold::from_wire(&payload) {
            Ok(hold) => {
                tracing::info!(
                    hold_id = hold.hold_id(),
                    status = hold.status().as_str(),
                    "Hold captured"
                );
                Ok(hold)
            }
            Err(e) => {
                tracing::error!(error = %e, hold_id, "Failed to decode hold payload");
                Err(Box::new(e))
            }
        }
    }

    async fn release_hold(&self, hold_id: &str) -> Result<Hold, ApiError> {
        tracing::info!(hold_id, "Releasing hold");
        let request = self
            .conf
            .request(Method::POST, &format!("/v1/payments/holds/{hold_id}/release"))
            .header("Idempotency-Key", Uuid::new_v4().to_string());
        let payload = self.conf.execute(request).await?;
        match Hold::from_wire(&payload) {
            Ok(hold) => {
                tracing::info!(
                    hold_id = hold.hold_id(),
                    status = hold.status().as_str(),
                    "Hold released"
                );
                Ok(hold)
            }
            Err(e) => {
                tracing::error!(error = %e, hold_id, "Failed to decode hold payload");
                Err(Box::new(e))
            }
        }
    }
}
