pub use crate::common::RouteResult;

use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{extract::FromRef, routing::get_service, Router};
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use waste_collection::client::Client;

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub client: Client,
    /// Base of the OSRM web viewer links.
    pub viewer_url: Arc<str>,
}

pub async fn start_web_server(
    state: WebState,
    bind_address: SocketAddr,
    static_dir: &Path,
) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(static_dir))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(bind_address).await?;
    log::info!("Dashboard listening on http://{}.", listener.local_addr()?);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

/// The dashboard page and its assets.
fn static_content_router(static_dir: &Path) -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new(static_dir)
                .not_found_service(ServeFile::new(static_dir.join("error404.html"))),
        ),
    )
}
