//! Wire format of the Carbon Interface estimates endpoint, fuel combustion
//! flavour.

use model::emission::EmissionEstimate;
use serde::{Deserialize, Serialize};

/// Distillate fuel oil, i.e. diesel.
pub const DIESEL: &str = "dfo";
pub const GALLON: &str = "gallon";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCombustionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub fuel_source_type: String,
    pub fuel_source_unit: String,
    pub fuel_source_value: f64,
}

impl FuelCombustionRequest {
    pub fn diesel_gallons(gallons: f64) -> Self {
        Self {
            kind: "fuel_combustion".to_owned(),
            fuel_source_type: DIESEL.to_owned(),
            fuel_source_unit: GALLON.to_owned(),
            fuel_source_value: gallons,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attributes {
    pub fuel_source_value: Option<f64>,
    pub carbon_g: f64,
    pub carbon_lb: f64,
    pub carbon_kg: f64,
    pub carbon_mt: f64,
    pub estimated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    pub id: Option<String>,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub data: Data,
}

impl EstimateResponse {
    /// `gallons` is what was asked for, used when the answer does not echo it.
    pub fn into_estimate(self, gallons: f64) -> EmissionEstimate {
        let attributes = self.data.attributes;
        EmissionEstimate {
            fuel_gallons: attributes.fuel_source_value.unwrap_or(gallons),
            carbon_g: attributes.carbon_g,
            carbon_lb: attributes.carbon_lb,
            carbon_kg: attributes.carbon_kg,
            carbon_mt: attributes.carbon_mt,
            estimated_at: attributes.estimated_at,
        }
    }
}
