use std::{error::Error, fmt};

use async_trait::async_trait;
use model::{
    emission::EmissionEstimate,
    route::{Route, RouteName},
    stop::Stop,
    RoutedPath,
};
use serde_json::Value;

pub mod client;
pub mod fleet;
pub mod projection;

pub type SourceError = Box<dyn Error + Send + Sync>;

/// Where the stops of a collection route come from.
#[async_trait]
pub trait StopSource: Send + Sync {
    /// Loads the stops of a collection route in driving order.
    /// Never called for [`RouteName::AterroGaragem`], which is derived.
    async fn load_route(&self, name: RouteName) -> Result<Route, SourceError>;
}

/// Road-network routing of an ordered stop sequence.
///
/// Implementations issue exactly one upstream request per call and yield
/// `None` when the upstream fails; they never retry.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route(&self, stops: &[Stop]) -> Option<RoutedPath>;

    /// The unparsed upstream response.
    async fn route_raw(&self, stops: &[Stop]) -> Option<Value>;
}

/// Carbon emission of burning diesel, by volume.
#[async_trait]
pub trait EmissionEstimator: Send + Sync {
    async fn estimate(&self, gallons: f64) -> Option<EmissionEstimate>;
}

#[derive(Debug)]
pub enum RequestError {
    /// The stops of a route could not be loaded.
    SourceUnavailable { route: RouteName, why: SourceError },
    /// A route had too few stops to do anything with.
    NotEnoughStops { route: RouteName, found: usize },
    InvalidParameter(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::SourceUnavailable { route, why } => {
                write!(f, "Stops of route {} unavailable: {}", route, why)
            }
            RequestError::NotEnoughStops { route, found } => write!(
                f,
                "Route {} needs at least two stops, found {}",
                route, found
            ),
            RequestError::InvalidParameter(why) => write!(f, "{why}"),
        }
    }
}

impl Error for RequestError {}

impl From<projection::ProjectionError> for RequestError {
    fn from(why: projection::ProjectionError) -> Self {
        RequestError::InvalidParameter(why.to_string())
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
