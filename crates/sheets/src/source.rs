use std::collections::HashMap;

use async_trait::async_trait;
use model::route::{Route, RouteName};
use waste_collection::{SourceError, StopSource};

use crate::{parse::parse_stops, ApiError};

pub const SHEET_URL_SAPUCAIA: &str = "https://docs.google.com/spreadsheets/d/1HeFq3PTkunMfmencOt5grV3ADZ9sBJM-boqpGpbuymM/export?format=csv";
pub const SHEET_URL_ANTA: &str = "https://docs.google.com/spreadsheets/d/1Q3JsL_9LOPb9_QKsKcvoVGrwR4MBWYBBCNplrxE957o/export?format=csv";
pub const SHEET_URL_APARECIDA: &str = "https://docs.google.com/spreadsheets/d/1C64cDoJcD9r5sGzUMJAMyH8ILSPwzS5hTKwtGABtdkk/export?format=csv";

/// Collection routes published as CSV exports of spreadsheets.
///
/// Sheets are downloaded again on every load.
#[derive(Debug, Clone)]
pub struct SheetSource {
    urls: HashMap<RouteName, String>,
    http: reqwest::Client,
}

impl SheetSource {
    pub fn new(urls: HashMap<RouteName, String>) -> Self {
        Self {
            urls,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_url<S: Into<String>>(mut self, route: RouteName, url: S) -> Self {
        self.urls.insert(route, url.into());
        self
    }

    pub fn url(&self, route: RouteName) -> Option<&str> {
        self.urls.get(&route).map(String::as_str)
    }

    pub async fn try_fetch_route(&self, name: RouteName) -> Result<Route, ApiError> {
        let url = self.url(name).ok_or(ApiError::NoSheet(name))?;
        log::debug!("Downloading sheet of route {name} from '{url}'.");

        let response = self.http.get(url).send().await?;
        let status_code = response.status();
        if status_code != reqwest::StatusCode::OK {
            return Err(ApiError::InvalidResponse {
                status_code,
                url: url.to_owned(),
                response: response.text().await.ok(),
            });
        }

        let body = response.bytes().await?;
        let stops = parse_stops(body.as_ref())?;
        log::info!("Loaded {} stops of route {}.", stops.len(), name);

        Ok(Route::new(name, stops))
    }
}

impl Default for SheetSource {
    fn default() -> Self {
        Self::new(HashMap::from([
            (RouteName::Sapucaia, SHEET_URL_SAPUCAIA.to_owned()),
            (RouteName::Anta, SHEET_URL_ANTA.to_owned()),
            (RouteName::Aparecida, SHEET_URL_APARECIDA.to_owned()),
        ]))
    }
}

#[async_trait]
impl StopSource for SheetSource {
    async fn load_route(&self, name: RouteName) -> Result<Route, SourceError> {
        Ok(self.try_fetch_route(name).await?)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::test_server::serve;

    const SHEET: &str = "\
Latitude,Longitude,Logradouro,Obs
-21.994048,-42.915773,Garagem,
,,,
-21.99374,-42.90851,Aterro,fim
";

    #[tokio::test]
    async fn test_load_route() {
        let (base_url, received) = serve(StatusCode::OK, SHEET).await;
        let source = SheetSource::new(HashMap::new())
            .with_url(RouteName::Anta, format!("{}/anta.csv", base_url));

        let route = source.load_route(RouteName::Anta).await.unwrap();

        assert_eq!(route.name, RouteName::Anta);
        assert_eq!(route.len(), 2);
        assert_eq!(route.last().unwrap().label, "Aterro");
        assert_eq!(*received.lock().unwrap(), vec!["/anta.csv".to_owned()]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let (base_url, _) = serve(StatusCode::NOT_FOUND, "Not Found").await;
        let source = SheetSource::new(HashMap::new()).with_url(RouteName::Sapucaia, base_url);

        assert!(matches!(
            source.try_fetch_route(RouteName::Sapucaia).await,
            Err(ApiError::InvalidResponse { status_code, .. })
                if status_code == reqwest::StatusCode::NOT_FOUND
        ));
        assert!(source.load_route(RouteName::Sapucaia).await.is_err());
    }

    #[tokio::test]
    async fn test_landfill_leg_has_no_sheet() {
        let source = SheetSource::default();

        assert!(matches!(
            source.try_fetch_route(RouteName::AterroGaragem).await,
            Err(ApiError::NoSheet(RouteName::AterroGaragem))
        ));
    }

    #[test]
    fn test_default_urls() {
        let source = SheetSource::default();

        for name in RouteName::COLLECTION {
            assert!(source.url(name).unwrap().ends_with("/export?format=csv"));
        }
        assert_eq!(source.url(RouteName::AterroGaragem), None);
    }
}
