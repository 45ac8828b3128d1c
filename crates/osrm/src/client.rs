use async_trait::async_trait;
use model::{stop::Stop, RoutedPath};
use serde_json::Value;
use waste_collection::RouteProvider;

use crate::{response::RouteResponse, ApiError, RouteQuery, OSRM_ROUTE_URL};

/// Client of the OSRM `route` service.
///
/// Every call is exactly one request. Failed requests are not retried and
/// responses are not cached.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    base_url: String,
    http: reqwest::Client,
}

impl OsrmClient {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the unparsed route response.
    pub async fn try_fetch_raw(&self, query: &RouteQuery) -> Result<Value, ApiError> {
        let body = self.get(query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn try_fetch_response(
        &self,
        query: &RouteQuery,
    ) -> Result<RouteResponse, ApiError> {
        let body = self.get(query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Distance, duration and geometry of the first route.
    pub async fn try_fetch_route(&self, query: &RouteQuery) -> Result<RoutedPath, ApiError> {
        let response = self.try_fetch_response(query).await?;
        response
            .first_route()
            .map(|route| route.routed_path())
            .ok_or(ApiError::NoRoute {
                code: response.code.clone(),
            })
    }

    /// Like [`Self::try_fetch_route`], but logs failures and yields `None`.
    pub async fn fetch_route(&self, query: &RouteQuery) -> Option<RoutedPath> {
        self.try_fetch_route(query)
            .await
            .map_err(|why| log::error!("route request failed: {}", why))
            .ok()
    }

    pub async fn fetch_raw(&self, query: &RouteQuery) -> Option<Value> {
        self.try_fetch_raw(query)
            .await
            .map_err(|why| log::error!("route request failed: {}", why))
            .ok()
    }

    async fn get(&self, query: &RouteQuery) -> Result<String, ApiError> {
        let url = query.url(&self.base_url);
        log::debug!("Requesting route '{url}'.");

        let response = self.http.get(&url).send().await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(response.text().await?),
            other => Err(ApiError::InvalidResponse {
                status_code: other,
                url,
                response: response.text().await.ok(),
            }),
        }
    }
}

impl Default for OsrmClient {
    fn default() -> Self {
        Self::new(OSRM_ROUTE_URL)
    }
}

fn query_for(stops: &[Stop]) -> Option<RouteQuery> {
    RouteQuery::new(stops)
        .map_err(|why| log::error!("invalid route query: {}", why))
        .ok()
}

#[async_trait]
impl RouteProvider for OsrmClient {
    async fn route(&self, stops: &[Stop]) -> Option<RoutedPath> {
        let query = query_for(stops)?;
        self.fetch_route(&query).await
    }

    async fn route_raw(&self, stops: &[Stop]) -> Option<Value> {
        let query = query_for(stops)?;
        self.fetch_raw(&query).await
    }
}
