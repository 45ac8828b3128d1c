use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod query;
pub mod response;
pub mod viewer;
pub mod vroom;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::OsrmClient;
pub use query::RouteQuery;

/// Public demo server of the OSRM project, car profile.
pub const OSRM_ROUTE_URL: &str = "http://router.project-osrm.org/route/v1/driving";

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The response was fine, but held no route.
    NoRoute { code: String },
    NotEnoughCoordinates(usize),
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::NoRoute { code } => write!(f, "No route found ({})", code),
            ApiError::NotEnoughCoordinates(found) => write!(
                f,
                "A route needs at least two coordinates, got {}",
                found
            ),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}
