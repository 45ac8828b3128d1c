use std::error;
use std::fmt;
use std::sync::Arc;

use model::route::RouteName;

pub mod parse;
pub mod source;

#[cfg(test)]
pub(crate) mod test_server;

pub use source::SheetSource;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    CsvError(Arc<csv::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The sheet lacks one of the required columns.
    MissingColumn(&'static str),
    /// No sheet is configured for the route.
    NoSheet(RouteName),
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::CsvError(e) => write!(f, "CSV parse error: {}", e),
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
            ApiError::MissingColumn(column) => write!(f, "Missing column '{}'", column),
            ApiError::NoSheet(route) => write!(f, "No sheet configured for route {}", route),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<csv::Error> for ApiError {
    fn from(e: csv::Error) -> Self {
        ApiError::CsvError(Arc::new(e))
    }
}
