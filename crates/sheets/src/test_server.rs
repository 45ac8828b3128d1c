use std::sync::{Arc, Mutex};

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Router,
};
use tokio::net::TcpListener;

/// Paths requested from a [`serve`] server.
pub(crate) type Received = Arc<Mutex<Vec<String>>>;

/// Serves `body` with `status` on a random local port.
pub(crate) async fn serve(status: StatusCode, body: &'static str) -> (String, Received) {
    let received: Received = Arc::default();
    let router = Router::new()
        .fallback(
            move |State(received): State<Received>, OriginalUri(uri): OriginalUri| async move {
                received.lock().unwrap().push(uri.path().to_owned());
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
