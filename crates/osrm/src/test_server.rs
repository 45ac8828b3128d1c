use std::sync::{Arc, Mutex};

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Router,
};
use tokio::net::TcpListener;

/// OSRM answer for a route through two stops, plus one alternative.
pub(crate) const TWO_STOP_RESPONSE: &str = r#"{
    "code": "Ok",
    "routes": [
        {
            "geometry": {
                "coordinates": [[-42.915773, -21.994048], [-42.91, -21.9938], [-42.90851, -21.99374]],
                "type": "LineString"
            },
            "legs": [{ "steps": [], "summary": "", "weight": 91.3, "duration": 91.3, "distance": 812.4 }],
            "weight_name": "routability",
            "weight": 91.3,
            "duration": 91.3,
            "distance": 812.4
        },
        {
            "geometry": { "coordinates": [], "type": "LineString" },
            "legs": [],
            "weight_name": "routability",
            "weight": 120.0,
            "duration": 120.0,
            "distance": 1020.0
        }
    ],
    "waypoints": [
        { "hint": "abc", "distance": 4.2, "name": "Rua A", "location": [-42.915773, -21.994048] },
        { "hint": "def", "distance": 1.1, "name": "Rua B", "location": [-42.90851, -21.99374] }
    ]
}"#;

/// Requests received by a [`serve`] server, as path and query.
pub(crate) type Received = Arc<Mutex<Vec<String>>>;

/// Serves `body` with `status` for every request on a random local port and
/// returns the base url of the server.
pub(crate) async fn serve(status: StatusCode, body: &'static str) -> (String, Received) {
    let received: Received = Arc::default();
    let router = Router::new()
        .fallback(
            move |State(received): State<Received>, OriginalUri(uri): OriginalUri| async move {
                received.lock().unwrap().push(uri.to_string());
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
