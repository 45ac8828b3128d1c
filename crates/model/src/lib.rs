use std::ops::Add;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use serde_with;

pub mod emission;
pub mod route;
pub mod shape;
pub mod stop;

use shape::Shape;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// Road-network totals of a route, as reported by the routing service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

impl RouteMetrics {
    pub fn new(distance: f64, duration: f64) -> Self {
        Self { distance, duration }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }
}

impl Add for RouteMetrics {
    type Output = RouteMetrics;

    fn add(self, other: Self) -> Self::Output {
        RouteMetrics {
            distance: self.distance + other.distance,
            duration: self.duration + other.duration,
        }
    }
}

impl ExampleData for RouteMetrics {
    fn example_data() -> Self {
        Self::new(21_000.0, 2_520.0)
    }
}

/// Result of routing an ordered stop sequence over the road network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutedPath {
    #[serde(flatten)]
    pub metrics: RouteMetrics,
    pub shape: Shape,
}

impl RoutedPath {
    pub fn new(metrics: RouteMetrics, shape: Shape) -> Self {
        Self { metrics, shape }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteMetrics;

    #[test]
    fn test_metrics_add_componentwise() {
        let collection = RouteMetrics::new(18_400.0, 2_100.0);
        let landfill_leg = RouteMetrics::new(6_300.0, 540.0);

        let total = collection + landfill_leg;

        assert_eq!(total, RouteMetrics::new(24_700.0, 2_640.0));
        assert_eq!(total.distance_km(), 24.7);
    }
}
