use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapePoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Road-following path of a route, in display order `(latitude, longitude)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Shape {
    pub points: Vec<ShapePoint>,
}

impl Shape {
    /// Builds a shape from GeoJSON positions, which are `[longitude, latitude]`.
    pub fn from_lon_lat<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            points: positions
                .into_iter()
                .map(|(longitude, latitude)| ShapePoint {
                    latitude,
                    longitude,
                })
                .collect(),
        }
    }

    pub fn lat_lon_pairs(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|point| (point.latitude, point.longitude))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
