use axum::{
    response::IntoResponse,
    routing::{get, on},
    Json, Router,
};
use serde_json::json;

pub mod v1;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .nest_service("/v1", v1::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use axum::{extract::OriginalUri, http::StatusCode};
    use model::route::RouteName;
    use osrm::OsrmClient;
    use serde_json::Value;
    use sheets::SheetSource;
    use tokio::net::TcpListener;
    use waste_collection::{client::Client, projection::Projector};

    use super::*;

    const ANTA_SHEET: &str = "\
Latitude,Longitude,Logradouro,Obs
-21.994048,-42.915773,Garagem,
-21.99374,-42.90851,Rua B,
";

    /// Serves the Anta sheet. Every other sheet is missing and routing is
    /// down.
    async fn upstream(OriginalUri(uri): OriginalUri) -> (StatusCode, &'static str) {
        match uri.path() {
            "/sheets/anta.csv" => (StatusCode::OK, ANTA_SHEET),
            _ => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        }
    }

    async fn bind(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", address)
    }

    async fn dashboard() -> String {
        let upstream_url = bind(Router::new().fallback(upstream)).await;

        let client = Client::new(
            Arc::new(SheetSource::new(HashMap::from([(
                RouteName::Anta,
                format!("{}/sheets/anta.csv", upstream_url),
            )]))),
            Arc::new(OsrmClient::new(format!("{}/route/v1/driving", upstream_url))),
            Projector::new(6.02).unwrap(),
        );
        let state = WebState {
            client,
            viewer_url: Arc::from("https://map.project-osrm.org/"),
        };

        bind(Router::new().nest_service("/api", routes(state))).await
    }

    async fn get(base_url: &str, path: &str) -> (StatusCode, Value) {
        let response = reqwest::get(format!("{}{}", base_url, path)).await.unwrap();
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (StatusCode::from_u16(status).unwrap(), body)
    }

    #[tokio::test]
    async fn test_ping() {
        let base_url = dashboard().await;

        let (status, body) = get(&base_url, "/api/ping").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong!");
    }

    #[tokio::test]
    async fn test_unknown_route_name_is_not_found() {
        let base_url = dashboard().await;

        let (status, body) = get(&base_url, "/api/v1/routes/Niteroi").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["requestedUri"], "/api/v1/routes/Niteroi");
    }

    #[tokio::test]
    async fn test_stops_of_a_loaded_sheet() {
        let base_url = dashboard().await;

        let (status, body) = get(&base_url, "/api/v1/routes/Anta/stops").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Anta");
        assert_eq!(body["stops"][1]["label"], "Rua B");
    }

    #[tokio::test]
    async fn test_unavailable_sheet_is_bad_gateway() {
        let base_url = dashboard().await;

        let (status, _) = get(&base_url, "/api/v1/routes/Sapucaia").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_unavailable_routing_is_bad_gateway_for_shape() {
        let base_url = dashboard().await;

        let (status, _) = get(&base_url, "/api/v1/routes/Anta/shape").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_fleet_answers_without_upstreams() {
        let base_url = dashboard().await;

        let (status, body) = get(&base_url, "/api/v1/fleet").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("currentM").is_none());
        assert!(body["links"].is_array());
    }

    #[tokio::test]
    async fn test_invalid_consumption_is_bad_request() {
        let base_url = dashboard().await;

        let (status, _) = get(&base_url, "/api/v1/comparison?consumption=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_comparison_for_one_consumption() {
        let base_url = dashboard().await;

        let (status, body) = get(&base_url, "/api/v1/comparison?consumption=3.5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scenarios"].as_array().map(Vec::len), Some(1));
    }
}
