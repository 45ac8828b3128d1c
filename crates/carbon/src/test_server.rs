use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Router,
};
use tokio::net::TcpListener;

pub(crate) const ESTIMATE_RESPONSE: &str = r#"{
    "data": {
        "id": "2d968a1b-f4a8-4f0b-b5c6-3d0a1c6c4b1e",
        "type": "estimate",
        "attributes": {
            "fuel_source_type": "dfo",
            "fuel_source_unit": "gallon",
            "fuel_source_value": 100.0,
            "estimated_at": "2024-06-01T10:00:00.000Z",
            "carbon_g": 1021000.0,
            "carbon_lb": 2250.91,
            "carbon_kg": 1021.0,
            "carbon_mt": 1.02
        }
    }
}"#;

/// A request seen by a [`serve`] server.
#[derive(Debug, Clone)]
pub(crate) struct Seen {
    pub authorization: Option<String>,
    pub body: String,
}

pub(crate) type Received = Arc<Mutex<Vec<Seen>>>;

/// Answers every request with `status` and `body` on a random local port.
pub(crate) async fn serve(status: StatusCode, body: &'static str) -> (String, Received) {
    let received: Received = Arc::default();
    let router = Router::new()
        .fallback(
            move |State(received): State<Received>, headers: HeaderMap, request: String| async move {
                received.lock().unwrap().push(Seen {
                    authorization: headers
                        .get(header::AUTHORIZATION)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_owned),
                    body: request,
                });
                (status, body)
            },
        )
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", address), received)
}
