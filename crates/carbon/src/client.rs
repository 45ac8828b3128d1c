use async_trait::async_trait;
use model::emission::EmissionEstimate;
use waste_collection::EmissionEstimator;

use crate::{
    estimate::{EstimateResponse, FuelCombustionRequest},
    ApiError, CARBON_API_URL,
};

/// Client of the Carbon Interface estimates API.
///
/// One POST per estimate, no retries.
#[derive(Clone)]
pub struct CarbonClient {
    api_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for CarbonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarbonClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl CarbonClient {
    pub fn new<U: Into<String>, K: Into<String>>(api_url: U, api_key: K) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Client of the public API.
    pub fn with_key<K: Into<String>>(api_key: K) -> Self {
        Self::new(CARBON_API_URL, api_key)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Carbon emitted by burning `gallons` of diesel.
    pub async fn try_estimate(&self, gallons: f64) -> Result<EmissionEstimate, ApiError> {
        if !gallons.is_finite() || gallons < 0.0 {
            return Err(ApiError::InvalidFuelValue(gallons));
        }

        log::debug!("Requesting emission estimate for {gallons} gallons.");

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&FuelCombustionRequest::diesel_gallons(gallons))
            .send()
            .await?;

        let status_code = response.status();
        if !status_code.is_success() {
            return Err(ApiError::InvalidResponse {
                status_code,
                url: self.api_url.clone(),
                response: response.text().await.ok(),
            });
        }

        let body = response.text().await?;
        let parsed: EstimateResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_estimate(gallons))
    }

    pub async fn estimate(&self, gallons: f64) -> Option<EmissionEstimate> {
        self.try_estimate(gallons)
            .await
            .map_err(|why| log::error!("emission estimate failed: {}", why))
            .ok()
    }
}

#[async_trait]
impl EmissionEstimator for CarbonClient {
    async fn estimate(&self, gallons: f64) -> Option<EmissionEstimate> {
        CarbonClient::estimate(self, gallons).await
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use axum::http::StatusCode;
    use serde_json::Value;

    use super::*;
    use crate::test_server::{serve, ESTIMATE_RESPONSE};

    #[tokio::test]
    async fn test_estimate() {
        let (base_url, received) = serve(StatusCode::CREATED, ESTIMATE_RESPONSE).await;
        let client = CarbonClient::new(format!("{}/api/v1/estimates", base_url), "secret");

        let estimate = EmissionEstimator::estimate(&client, 100.0).await.unwrap();

        assert_relative_eq!(estimate.carbon_kg, 1021.0);
        assert_relative_eq!(estimate.carbon_lb, 2250.91);

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].authorization.as_deref(), Some("Bearer secret"));

        let body: Value = serde_json::from_str(&received[0].body).unwrap();
        assert_eq!(body["type"], "fuel_combustion");
        assert_eq!(body["fuel_source_type"], "dfo");
        assert_eq!(body["fuel_source_unit"], "gallon");
        assert_eq!(body["fuel_source_value"], 100.0);
    }

    #[tokio::test]
    async fn test_unauthorized_is_absent() {
        let (base_url, received) =
            serve(StatusCode::UNAUTHORIZED, r#"{"message":"unauthorized"}"#).await;
        let client = CarbonClient::new(base_url, "wrong");

        assert!(client.estimate(100.0).await.is_none());
        assert_eq!(received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_error_carries_status() {
        let (base_url, _) = serve(StatusCode::UNAUTHORIZED, "unauthorized").await;
        let client = CarbonClient::new(base_url, "wrong");

        match client.try_estimate(1.0).await {
            Err(ApiError::InvalidResponse {
                status_code,
                response,
                ..
            }) => {
                assert_eq!(status_code, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(response.as_deref(), Some("unauthorized"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_absent() {
        let (base_url, _) = serve(StatusCode::OK, "{}").await;
        let client = CarbonClient::new(base_url, "secret");

        assert!(matches!(
            client.try_estimate(1.0).await,
            Err(ApiError::JsonError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_quantity_is_not_sent() {
        let (base_url, received) = serve(StatusCode::CREATED, ESTIMATE_RESPONSE).await;
        let client = CarbonClient::new(base_url, "secret");

        assert!(client.estimate(f64::NAN).await.is_none());
        assert!(client.estimate(-1.0).await.is_none());
        assert!(received.lock().unwrap().is_empty());
    }
}
