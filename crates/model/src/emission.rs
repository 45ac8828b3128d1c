use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Carbon emitted by burning a quantity of fuel.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmissionEstimate {
    /// US gallons of fuel the estimate was made for.
    pub fuel_gallons: f64,
    pub carbon_g: f64,
    pub carbon_lb: f64,
    pub carbon_kg: f64,
    pub carbon_mt: f64,
    pub estimated_at: Option<String>,
}

impl ExampleData for EmissionEstimate {
    fn example_data() -> Self {
        Self {
            fuel_gallons: 1_000.0,
            carbon_g: 10_210_000.0,
            carbon_lb: 22_509.06,
            carbon_kg: 10_210.0,
            carbon_mt: 10.21,
            estimated_at: Some("2024-01-15T12:00:00.000Z".to_owned()),
        }
    }
}
