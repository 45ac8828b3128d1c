use std::sync::Arc;

use axum::{
    routing::{get, on},
    Extension, Router,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
    common::{route_not_found, HateoasResult, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

mod comparison;
mod fleet;
mod routes;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service("/routes", routes::routes(state.clone()))
        .nest_service("/fleet", fleet::routes(state.clone()))
        .nest_service("/comparison", comparison::routes(state.clone()))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct IndexDto {
    title: &'static str,
}

async fn index(Extension(base_url): Extension<Arc<BaseUrl>>) -> HateoasResult<IndexDto> {
    Ok(hateoas::Response::builder(
        IndexDto {
            title: "OSRM - Sapucaia",
        },
        base_url,
    )
    .link("routes", routes::resource!(""))
    .link("fleet", fleet::resource!(""))
    .link("comparison", comparison::resource!(""))
    .build()
    .json())
}
