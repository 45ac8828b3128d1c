use std::{sync::Arc, time::Instant};

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    response::IntoResponse,
    routing::{get, on},
    Extension, Router,
};
use model::{
    route::{Route, RouteName},
    shape::ShapePoint,
};
use osrm::{viewer::viewer_link, vroom::Problem};
use schemars::JsonSchema;
use serde::Serialize;
use waste_collection::{client::RouteReport, RequestError};

use crate::{
    common::{
        json_attachment, route_not_found, schema, schema_no_example, HateoasResult,
        RouteErrorResponse, RouteResult, VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/routes{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_routes))
        .route("/schema", get(schema_no_example::<RouteReport>))
        .route("/schema/stops", get(schema::<Route>))
        .route("/:name", get(get_route))
        .route("/:name/stops", get(get_stops))
        .route("/:name/shape", get(get_shape))
        .route("/:name/raw", get(get_raw))
        .route("/:name/vroom", get(get_vroom))
        .route("/:name/viewer", get(get_viewer))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

fn route_name(name: &str, uri: &str) -> RouteResult<RouteName> {
    name.parse::<RouteName>().map_err(|why| {
        RouteErrorResponse::not_found(&Method::GET, uri).with_detailed_information(why.to_string())
    })
}

fn request_error(why: RequestError, uri: &str) -> RouteErrorResponse {
    RouteErrorResponse::from(why)
        .with_method(&Method::GET)
        .with_uri(uri)
}

fn routing_unavailable(uri: &str) -> RouteErrorResponse {
    RouteErrorResponse::bad_gateway("The routing service did not answer.")
        .with_method(&Method::GET)
        .with_uri(uri)
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummaryDto {
    pub name: RouteName,
    pub zoom: u8,
    pub landfill_leg: bool,
}

async fn get_routes(
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<RouteSummaryDto>>> {
    let data = RouteName::ALL
        .into_iter()
        .map(|name| {
            hateoas::Response::builder(
                RouteSummaryDto {
                    name,
                    zoom: name.zoom(),
                    landfill_leg: name.is_landfill_leg(),
                },
                base_url.clone(),
            )
            .link("self", resource!("/{}", name))
            .build()
        })
        .collect::<Vec<_>>();

    Ok(VecResponse::new(data).hateoas().json())
}

async fn get_route(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
    State(WebState { client, viewer_url }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<RouteReport> {
    let name = route_name(&name, original_uri.path())?;

    let now = Instant::now();
    let report = client
        .route_report(name)
        .await
        .map_err(|why| request_error(why, original_uri.path()))?;
    let elapsed = now.elapsed();

    let viewer = viewer_link(&viewer_url, &report.stops);

    Ok(hateoas::Response::builder(report, base_url)
        .link("self", resource!("/{}", name))
        .link("stops", resource!("/{}/stops", name))
        .link("shape", resource!("/{}/shape", name))
        .link("raw", resource!("/{}/raw", name))
        .link("vroom", resource!("/{}/vroom", name))
        .link_extern_option("viewer", viewer)
        .debug_info("elapsedSecs", elapsed.as_secs_f64())
        .build()
        .json())
}

/// The stops as loaded, without routing them.
async fn get_stops(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Route> {
    let name = route_name(&name, original_uri.path())?;

    let route = client
        .route(name)
        .await
        .map_err(|why| request_error(why, original_uri.path()))?;

    Ok(hateoas::Response::builder(route, base_url)
        .link("route", resource!("/{}", name))
        .build()
        .json())
}

/// The routed geometry as a table of points.
async fn get_shape(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
    State(WebState { client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<ShapePoint>> {
    let name = route_name(&name, original_uri.path())?;

    let path = client
        .routed_path(name)
        .await
        .map_err(|why| request_error(why, original_uri.path()))?
        .ok_or_else(|| routing_unavailable(original_uri.path()))?;

    Ok(
        hateoas::Response::builder(VecResponse::new(path.shape.points), base_url)
            .link("route", resource!("/{}", name))
            .build()
            .json(),
    )
}

/// The unmodified routing response, as a download.
async fn get_raw(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
    State(WebState { client, .. }): State<WebState>,
) -> RouteResult<impl IntoResponse> {
    let name = route_name(&name, original_uri.path())?;

    let raw = client
        .route_raw(name)
        .await
        .map_err(|why| request_error(why, original_uri.path()))?
        .ok_or_else(|| routing_unavailable(original_uri.path()))?;

    json_attachment(&format!("rota_{}.json", name), &raw)
}

async fn get_vroom(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
    State(WebState { client, .. }): State<WebState>,
) -> RouteResult<impl IntoResponse> {
    let name = route_name(&name, original_uri.path())?;

    let route = client
        .route(name)
        .await
        .map_err(|why| request_error(why, original_uri.path()))?;
    let problem = Problem::single_vehicle(&route.stops).ok_or_else(|| {
        request_error(
            RequestError::NotEnoughStops {
                route: name,
                found: 0,
            },
            original_uri.path(),
        )
    })?;

    json_attachment(&format!("VROOM_{}.json", name), &problem)
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewerDto {
    pub url: String,
}

async fn get_viewer(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
    State(WebState { client, viewer_url }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<ViewerDto> {
    let name = route_name(&name, original_uri.path())?;

    let route = client
        .route(name)
        .await
        .map_err(|why| request_error(why, original_uri.path()))?;
    let url = viewer_link(&viewer_url, &route.stops).ok_or_else(|| {
        request_error(
            RequestError::NotEnoughStops {
                route: name,
                found: 0,
            },
            original_uri.path(),
        )
    })?;

    Ok(hateoas::Response::builder(ViewerDto { url: url.clone() }, base_url)
        .link("route", resource!("/{}", name))
        .link_extern("viewer", url)
        .build()
        .json())
}
