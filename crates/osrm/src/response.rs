use model::{shape::Shape, RouteMetrics, RoutedPath};
use serde::{Deserialize, Serialize};

/// GeoJSON `LineString`. Positions are `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    pub geometry: Geometry,
}

impl Route {
    pub fn metrics(&self) -> RouteMetrics {
        RouteMetrics::new(self.distance, self.duration)
    }

    /// Geometry turned around into display order.
    pub fn shape(&self) -> Shape {
        Shape::from_lon_lat(
            self.geometry
                .coordinates
                .iter()
                .map(|[longitude, latitude]| (*longitude, *latitude)),
        )
    }

    pub fn routed_path(&self) -> RoutedPath {
        RoutedPath::new(self.metrics(), self.shape())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// OSRM orders alternatives by preference, the first one is the route.
    pub fn first_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}
