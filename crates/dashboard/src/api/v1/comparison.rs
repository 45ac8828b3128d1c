use std::{sync::Arc, time::Instant};

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use itertools::Itertools;
use model::emission::EmissionEstimate;
use serde::Deserialize;
use waste_collection::{
    client::Comparison, projection::ConsumptionScenario, RequestError,
};

use crate::{
    api::v1::fleet,
    common::{
        route_not_found, schema, schema_no_example, HateoasResult, RouteErrorResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/comparison{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_comparison))
        .route("/schema", get(schema_no_example::<Comparison>))
        .route("/schema/emission", get(schema::<EmissionEstimate>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparisonQuery {
    /// km per liter. All default consumptions when absent.
    consumption: Option<f64>,
}

/// Cost and emission of the current fleet against the optimized truck, per
/// consumption scenario.
async fn get_comparison(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client, .. }): State<WebState>,
    Query(params): Query<ComparisonQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Comparison> {
    let scenarios = ConsumptionScenario::select(params.consumption).map_err(|why| {
        RouteErrorResponse::from(RequestError::from(why))
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    })?;
    let consumptions = scenarios
        .iter()
        .map(|scenario| scenario.km_per_liter)
        .join(",");
    log::debug!("Comparing fleets for consumptions {consumptions} km/l.");

    let now = Instant::now();
    let comparison = client.comparison(&scenarios).await;
    let elapsed = now.elapsed();

    Ok(hateoas::Response::builder(comparison, base_url)
        .link("fleet", fleet::resource!(""))
        .debug_info("consumptions", consumptions)
        .debug_info("elapsedSecs", elapsed.as_secs_f64())
        .build()
        .json())
}
