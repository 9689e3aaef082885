//! HTTP client for the delivery provider API.

use serde::Deserialize;
use thiserror::Error;

use crate::shipment::ShipmentRequest;

/// Provider response to a successful `create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedShipment {
    pub tracking: String,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("shipment request has no deliverable address")]
    NotSubmittable,
}

/// Client for the parcel provider's REST API.
///
/// One attempt per call: a failed operation surfaces a typed error and leaves
/// retry policy to the caller (the storefront shows a notification and lets the
/// operator retry).
pub struct DeliveryClient {
    api_url: String,
    api_token: String,
    http: reqwest::Client,
}

impl DeliveryClient {
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Submit a new shipment; returns the provider-assigned tracking number.
    ///
    /// Refuses a request built from a missing address rather than posting it.
    pub async fn create(&self, request: &ShipmentRequest) -> Result<CreatedShipment, DeliveryError> {
        if !request.is_submittable() {
            return Err(DeliveryError::NotSubmittable);
        }

        tracing::info!(reference = %request.reference, "submitting shipment to provider");

        let url = format!("{}/api/public/create/order", self.api_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DeliveryError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json::<CreatedShipment>()
            .await
            .map_err(|e| DeliveryError::Parse(e.to_string()))
    }

    /// Update a shipment that has not left the provider's intake yet.
    pub async fn update(
        &self,
        tracking: &str,
        request: &ShipmentRequest,
    ) -> Result<(), DeliveryError> {
        let url = format!("{}/api/public/update/order", self.api_url);
        let mut body = serde_json::to_value(request)
            .map_err(|e| DeliveryError::Parse(e.to_string()))?;
        body["tracking"] = serde_json::Value::String(tracking.to_string());

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DeliveryError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        Ok(())
    }

    /// Cancel a shipment by tracking number.
    pub async fn cancel(&self, tracking: &str) -> Result<(), DeliveryError> {
        tracing::info!(%tracking, "cancelling shipment");

        let url = format!("{}/api/public/delete/order", self.api_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&serde_json::json!({ "tracking": tracking }))
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DeliveryError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        Ok(())
    }

    /// Fetch the shipping label PDF for a tracking number.
    pub async fn label(&self, tracking: &str) -> Result<Vec<u8>, DeliveryError> {
        let url = format!("{}/api/public/get/order/label", self.api_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("tracking", tracking)])
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DeliveryError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
