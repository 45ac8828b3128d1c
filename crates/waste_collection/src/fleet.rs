use model::{route::RouteName, RouteMetrics};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Distance of a collection route when all routes are driven by one truck,
/// as found by the offline optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedLeg {
    pub route: RouteName,
    pub distance_km: f64,
}

/// The single-truck alternative to the current fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedFleet {
    pub legs: Vec<OptimizedLeg>,
}

impl OptimizedFleet {
    pub fn new(legs: Vec<OptimizedLeg>) -> Self {
        Self { legs }
    }

    /// Total daily distance in meters. The truck drives back from the landfill
    /// to the garage once after every leg.
    pub fn distance_m(&self, landfill_leg_m: f64) -> f64 {
        let legs_m: f64 = self.legs.iter().map(|leg| leg.distance_km * 1000.0).sum();
        legs_m + self.legs.len() as f64 * landfill_leg_m
    }
}

impl Default for OptimizedFleet {
    fn default() -> Self {
        Self::new(vec![
            OptimizedLeg {
                route: RouteName::Sapucaia,
                distance_km: 21.0,
            },
            OptimizedLeg {
                route: RouteName::Aparecida,
                distance_km: 52.4,
            },
            OptimizedLeg {
                route: RouteName::Anta,
                distance_km: 34.9,
            },
        ])
    }
}

/// Daily distance of the current fleet: every collection route including its
/// trip back from the landfill. `None` if any route could not be routed.
pub fn current_fleet_distance_m<I>(route_totals: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<RouteMetrics>>,
{
    route_totals
        .into_iter()
        .map(|total| total.map(|metrics| metrics.distance))
        .sum()
}
