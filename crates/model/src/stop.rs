use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A collection point of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub latitude: f64,
    pub longitude: f64,
    /// Street address ("logradouro") of the stop.
    pub label: String,
}

impl Stop {
    pub fn new<S: Into<String>>(latitude: f64, longitude: f64, label: S) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }

    /// Storage order, `(latitude, longitude)`.
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// GeoJSON / OSRM order, `(longitude, latitude)`.
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}
