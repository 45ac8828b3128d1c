use std::{sync::Arc, time::Instant};

use axum::{
    extract::State,
    routing::{get, on},
    Extension, Router,
};
use model::RouteMetrics;
use waste_collection::client::FleetDistances;

use crate::{
    api::v1::{comparison, routes as route_resources},
    common::{route_not_found, schema, schema_no_example, HateoasResult, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/fleet{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_fleet))
        .route("/schema", get(schema_no_example::<FleetDistances>))
        .route("/schema/metrics", get(schema::<RouteMetrics>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Daily distance of the current routes and of the optimized truck. Routes
/// that could not be routed are left out, the call itself does not fail.
async fn get_fleet(
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<FleetDistances> {
    let now = Instant::now();
    let distances = client.fleet_distances().await;
    let elapsed = now.elapsed();

    let links = distances
        .routes
        .iter()
        .map(|route| (route.route.to_string(), route_resources::resource!("/{}", route.route)))
        .collect::<Vec<_>>();

    Ok(links
        .into_iter()
        .fold(
            hateoas::Response::builder(distances, base_url),
            |builder, (relation, path)| builder.link(relation, path),
        )
        .link("self", resource!(""))
        .link("comparison", comparison::resource!(""))
        .debug_info("elapsedSecs", elapsed.as_secs_f64())
        .build()
        .json())
}
