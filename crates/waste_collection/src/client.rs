use std::sync::Arc;

use model::{
    emission::EmissionEstimate,
    route::{Route, RouteName},
    shape::ShapePoint,
    stop::Stop,
    RouteMetrics, RoutedPath,
};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use utility::time::humanize_duration;

use crate::{
    fleet::{current_fleet_distance_m, OptimizedFleet},
    projection::{ConsumptionScenario, Projector, ScenarioProjection},
    EmissionEstimator, RequestError, RequestResult, RouteProvider, StopSource,
};

pub const LANDFILL_LEG_NOTE: &str = "Estes valores já estão acrescidos nas demais rotas";

/// Everything the dashboard shows about one route.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub name: RouteName,
    pub zoom: u8,
    pub center: Option<ShapePoint>,
    pub stops: Vec<Stop>,
    pub straight_line_km: f64,
    /// Routing of the stops themselves.
    pub path: Option<RoutedPath>,
    /// Trip back from the landfill, added to the route's totals.
    pub landfill_leg: Option<RouteMetrics>,
    pub total: Option<RouteMetrics>,
    pub total_duration_text: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteTotal {
    pub route: RouteName,
    pub total: Option<RouteMetrics>,
}

/// Daily distances driven by the current fleet and the single optimized truck.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetDistances {
    pub landfill_leg: Option<RouteMetrics>,
    pub routes: Vec<RouteTotal>,
    pub current_m: Option<f64>,
    pub optimized_m: Option<f64>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetProjection {
    #[serde(flatten)]
    pub projection: ScenarioProjection,
    pub emission: Option<EmissionEstimate>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub scenario: ConsumptionScenario,
    pub current: Option<FleetProjection>,
    pub optimized: Option<FleetProjection>,
    pub yearly_savings: Option<f64>,
    pub yearly_carbon_kg_avoided: Option<f64>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub fuel_price: f64,
    pub optimized_fleet: OptimizedFleet,
    pub distances: FleetDistances,
    pub scenarios: Vec<ScenarioComparison>,
}

/// Entry point of the dashboard computations. Holds no state besides its
/// providers: every call goes upstream again.
#[derive(Clone)]
pub struct Client {
    stops: Arc<dyn StopSource>,
    router: Arc<dyn RouteProvider>,
    emissions: Option<Arc<dyn EmissionEstimator>>,
    projector: Projector,
    fleet: OptimizedFleet,
}

impl Client {
    pub fn new(
        stops: Arc<dyn StopSource>,
        router: Arc<dyn RouteProvider>,
        projector: Projector,
    ) -> Self {
        Self {
            stops,
            router,
            emissions: None,
            projector,
            fleet: OptimizedFleet::default(),
        }
    }

    pub fn with_emissions(mut self, emissions: Arc<dyn EmissionEstimator>) -> Self {
        self.emissions = Some(emissions);
        self
    }

    pub fn with_optimized_fleet(mut self, fleet: OptimizedFleet) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn optimized_fleet(&self) -> &OptimizedFleet {
        &self.fleet
    }

    /// Loads the stops of a route. The landfill leg is the last stop of the
    /// Sapucaia route followed by its first stop (the garage).
    pub async fn route(&self, name: RouteName) -> RequestResult<Route> {
        if name.is_landfill_leg() {
            let sapucaia = self.load(RouteName::Sapucaia).await?;
            return landfill_leg(&sapucaia);
        }
        self.load(name).await
    }

    async fn load(&self, name: RouteName) -> RequestResult<Route> {
        self.stops
            .load_route(name)
            .await
            .map_err(|why| RequestError::SourceUnavailable { route: name, why })
    }

    pub async fn routed_path(&self, name: RouteName) -> RequestResult<Option<RoutedPath>> {
        let route = self.route(name).await?;
        self.route_stops(&route).await
    }

    pub async fn route_raw(&self, name: RouteName) -> RequestResult<Option<Value>> {
        let route = self.route(name).await?;
        ensure_routable(&route)?;
        Ok(self.router.route_raw(&route.stops).await)
    }

    async fn route_stops(&self, route: &Route) -> RequestResult<Option<RoutedPath>> {
        ensure_routable(route)?;
        let path = self.router.route(&route.stops).await;
        if path.is_none() {
            log::warn!("route {} could not be routed.", route.name);
        }
        Ok(path)
    }

    pub async fn landfill_leg_metrics(&self) -> RequestResult<Option<RouteMetrics>> {
        Ok(self
            .routed_path(RouteName::AterroGaragem)
            .await?
            .map(|path| path.metrics))
    }

    pub async fn route_report(&self, name: RouteName) -> RequestResult<RouteReport> {
        let route = self.route(name).await?;
        let path = self.route_stops(&route).await?;

        let (landfill_leg, total, note) = if name.is_landfill_leg() {
            let total = path.as_ref().map(|path| path.metrics);
            (None, total, Some(LANDFILL_LEG_NOTE.to_owned()))
        } else {
            let landfill_leg = self.landfill_leg_metrics().await?;
            let total = path
                .as_ref()
                .zip(landfill_leg)
                .map(|(path, leg)| path.metrics + leg);
            (landfill_leg, total, None)
        };

        Ok(RouteReport {
            name,
            zoom: name.zoom(),
            center: route.center().map(|(latitude, longitude)| ShapePoint {
                latitude,
                longitude,
            }),
            straight_line_km: route.straight_line_km(),
            stops: route.stops,
            path,
            landfill_leg,
            total,
            total_duration_text: total.map(|total| humanize_duration(total.duration)),
            note,
        })
    }

    /// Routes the landfill leg and every collection route. Routes that fail to
    /// load or to route are reported as absent, they never fail the whole call.
    pub async fn fleet_distances(&self) -> FleetDistances {
        let landfill_leg = match self.landfill_leg_metrics().await {
            Ok(leg) => leg,
            Err(why) => {
                log::warn!("landfill leg unavailable: {}", why);
                None
            }
        };

        let mut routes = vec![];
        for name in RouteName::COLLECTION {
            let own = match self.routed_path(name).await {
                Ok(path) => path.map(|path| path.metrics),
                Err(why) => {
                    log::warn!("{}", why);
                    None
                }
            };
            routes.push(RouteTotal {
                route: name,
                total: own.zip(landfill_leg).map(|(own, leg)| own + leg),
            });
        }

        let current_m = current_fleet_distance_m(routes.iter().map(|route| route.total));
        let optimized_m = landfill_leg.map(|leg| self.fleet.distance_m(leg.distance));

        FleetDistances {
            landfill_leg,
            routes,
            current_m,
            optimized_m,
        }
    }

    pub async fn comparison(
        &self,
        scenarios: &[ConsumptionScenario],
    ) -> Comparison {
        let distances = self.fleet_distances().await;

        let mut comparisons = vec![];
        for scenario in scenarios {
            let current = self.fleet_projection(distances.current_m, scenario).await;
            let optimized = self.fleet_projection(distances.optimized_m, scenario).await;

            let yearly_savings = current
                .as_ref()
                .zip(optimized.as_ref())
                .map(|(current, optimized)| {
                    current.projection.cost.yearly - optimized.projection.cost.yearly
                });
            let yearly_carbon_kg_avoided = current
                .as_ref()
                .and_then(|current| current.emission.as_ref())
                .zip(optimized.as_ref().and_then(|optimized| optimized.emission.as_ref()))
                .map(|(current, optimized)| current.carbon_kg - optimized.carbon_kg);

            comparisons.push(ScenarioComparison {
                scenario: scenario.clone(),
                current,
                optimized,
                yearly_savings,
                yearly_carbon_kg_avoided,
            });
        }

        Comparison {
            fuel_price: self.projector.fuel_price(),
            optimized_fleet: self.fleet.clone(),
            distances,
            scenarios: comparisons,
        }
    }

    async fn fleet_projection(
        &self,
        distance_m: Option<f64>,
        scenario: &ConsumptionScenario,
    ) -> Option<FleetProjection> {
        let projection = self.projector.project(distance_m?, scenario);
        let emission = match &self.emissions {
            Some(estimator) => estimator.estimate(projection.yearly_gallons).await,
            None => None,
        };
        Some(FleetProjection {
            projection,
            emission,
        })
    }
}

fn ensure_routable(route: &Route) -> RequestResult<()> {
    if route.len() < 2 {
        return Err(RequestError::NotEnoughStops {
            route: route.name,
            found: route.len(),
        });
    }
    Ok(())
}

pub fn landfill_leg(sapucaia: &Route) -> RequestResult<Route> {
    match (sapucaia.last(), sapucaia.first()) {
        (Some(landfill), Some(garage)) => Ok(Route::new(
            RouteName::AterroGaragem,
            vec![landfill.clone(), garage.clone()],
        )),
        _ => Err(RequestError::NotEnoughStops {
            route: RouteName::AterroGaragem,
            found: 0,
        }),
    }
}
