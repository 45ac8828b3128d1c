//! Fuel cost and fuel volume projections of a daily driven distance.
//!
//! The period multipliers are fixed and not calendar accurate: the trucks run
//! six days a week, a month is four weeks, a year is twelve months.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liters per US gallon.
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// Price of a liter of diesel S10 in Rio de Janeiro (ANP), in BRL.
pub const DEFAULT_FUEL_PRICE: f64 = 6.02;

pub const WORKING_DAYS_PER_WEEK: f64 = 6.0;
pub const WEEKS_PER_MONTH: f64 = 4.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Truck fuel consumptions the dashboard compares, km per liter.
pub const DEFAULT_CONSUMPTIONS: [f64; 3] = [3.0, 3.5, 4.0];

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    InvalidConsumption(f64),
    InvalidFuelPrice(f64),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProjectionError::InvalidConsumption(value) => write!(
                f,
                "Fuel consumption must be a positive number of km/l, got {}",
                value
            ),
            ProjectionError::InvalidFuelPrice(value) => {
                write!(f, "Fuel price must be positive, got {}", value)
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// A named fuel consumption assumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionScenario {
    pub name: String,
    pub km_per_liter: f64,
}

impl ConsumptionScenario {
    pub fn new<S: Into<String>>(
        name: S,
        km_per_liter: f64,
    ) -> Result<Self, ProjectionError> {
        if !positive_finite(km_per_liter) {
            return Err(ProjectionError::InvalidConsumption(km_per_liter));
        }
        Ok(Self {
            name: name.into(),
            km_per_liter,
        })
    }

    /// Scenario named after its consumption, e.g. `3.5 km/l`.
    pub fn from_rate(km_per_liter: f64) -> Result<Self, ProjectionError> {
        Self::new(format!("{} km/l", km_per_liter), km_per_liter)
    }

    /// The scenarios selected in the dashboard: every default consumption, or
    /// only the one picked on the slider.
    pub fn select(km_per_liter: Option<f64>) -> Result<Vec<Self>, ProjectionError> {
        match km_per_liter {
            Some(rate) => Ok(vec![Self::from_rate(rate)?]),
            None => Ok(Self::defaults()),
        }
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_CONSUMPTIONS
            .iter()
            .map(|rate| Self {
                name: format!("{} km/l", rate),
                km_per_liter: *rate,
            })
            .collect()
    }
}

/// Fuel cost of driving the same distance every working day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostProjection {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl CostProjection {
    pub fn from_daily(daily: f64) -> Self {
        let weekly = daily * WORKING_DAYS_PER_WEEK;
        let monthly = weekly * WEEKS_PER_MONTH;
        let yearly = monthly * MONTHS_PER_YEAR;
        Self {
            daily,
            weekly,
            monthly,
            yearly,
        }
    }
}

pub fn daily_cost(distance_m: f64, km_per_liter: f64, fuel_price: f64) -> f64 {
    ((distance_m / 1000.0) / km_per_liter) * fuel_price
}

pub fn project_cost(distance_m: f64, km_per_liter: f64, fuel_price: f64) -> CostProjection {
    CostProjection::from_daily(daily_cost(distance_m, km_per_liter, fuel_price))
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / LITERS_PER_GALLON
}

/// Fuel volume bought with `cost` at `fuel_price` per liter.
pub fn cost_to_liters(cost: f64, fuel_price: f64) -> f64 {
    cost / fuel_price
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub scenario: ConsumptionScenario,
    pub cost: CostProjection,
    pub yearly_liters: f64,
    /// Input of the emission estimate.
    pub yearly_gallons: f64,
}

/// A validated fuel price plus the projections that depend on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    fuel_price: f64,
}

impl Projector {
    pub fn new(fuel_price: f64) -> Result<Self, ProjectionError> {
        if !positive_finite(fuel_price) {
            return Err(ProjectionError::InvalidFuelPrice(fuel_price));
        }
        Ok(Self { fuel_price })
    }

    pub fn fuel_price(&self) -> f64 {
        self.fuel_price
    }

    pub fn project(
        &self,
        distance_m: f64,
        scenario: &ConsumptionScenario,
    ) -> ScenarioProjection {
        let cost = project_cost(distance_m, scenario.km_per_liter, self.fuel_price);
        let yearly_liters = cost_to_liters(cost.yearly, self.fuel_price);
        ScenarioProjection {
            scenario: scenario.clone(),
            cost,
            yearly_liters,
            yearly_gallons: liters_to_gallons(yearly_liters),
        }
    }

    pub fn project_all(
        &self,
        distance_m: f64,
        scenarios: &[ConsumptionScenario],
    ) -> Vec<ScenarioProjection> {
        scenarios
            .iter()
            .map(|scenario| self.project(distance_m, scenario))
            .collect()
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            fuel_price: DEFAULT_FUEL_PRICE,
        }
    }
}
