use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::{stop::Stop, ExampleData};

/// The routes shown by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RouteName {
    Sapucaia,
    Anta,
    Aparecida,
    /// Landfill back to the garage. Not a collection route on its own, its
    /// totals are added to every collection route.
    #[serde(rename = "Aterro-Garagem")]
    AterroGaragem,
}

impl RouteName {
    pub const ALL: [RouteName; 4] = [
        RouteName::Sapucaia,
        RouteName::Anta,
        RouteName::Aparecida,
        RouteName::AterroGaragem,
    ];

    pub const COLLECTION: [RouteName; 3] =
        [RouteName::Sapucaia, RouteName::Anta, RouteName::Aparecida];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Sapucaia => "Sapucaia",
            RouteName::Anta => "Anta",
            RouteName::Aparecida => "Aparecida",
            RouteName::AterroGaragem => "Aterro-Garagem",
        }
    }

    /// Initial zoom level of the route map.
    pub fn zoom(&self) -> u8 {
        match self {
            RouteName::Sapucaia => 14,
            RouteName::Anta | RouteName::Aparecida => 15,
            RouteName::AterroGaragem => 13,
        }
    }

    pub fn is_landfill_leg(&self) -> bool {
        matches!(self, RouteName::AterroGaragem)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRouteName(pub String);

impl fmt::Display for UnknownRouteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown route: {}", self.0)
    }
}

impl std::error::Error for UnknownRouteName {}

impl FromStr for RouteName {
    type Err = UnknownRouteName;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let key = input.trim().to_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "sapucaia" => Ok(RouteName::Sapucaia),
            "anta" => Ok(RouteName::Anta),
            "aparecida" => Ok(RouteName::Aparecida),
            "aterro-garagem" | "aterrogaragem" => Ok(RouteName::AterroGaragem),
            _ => Err(UnknownRouteName(input.to_owned())),
        }
    }
}

/// A named, ordered sequence of stops. The order is the order the truck
/// drives them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: RouteName,
    pub stops: Vec<Stop>,
}

impl Route {
    pub fn new(name: RouteName, stops: Vec<Stop>) -> Self {
        Self { name, stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn first(&self) -> Option<&Stop> {
        self.stops.first()
    }

    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Mean of all stop coordinates, `(latitude, longitude)`.
    pub fn center(&self) -> Option<(f64, f64)> {
        geo::mean_center(self.stops.iter().map(Stop::lat_lon))
    }

    /// Length of the polyline through all stops, ignoring the road network.
    pub fn straight_line_km(&self) -> f64 {
        let points = self.stops.iter().map(Stop::lat_lon).collect::<Vec<_>>();
        geo::path_length_km(&points)
    }
}

impl ExampleData for Route {
    fn example_data() -> Self {
        Route::new(
            RouteName::Sapucaia,
            vec![
                Stop::new(-21.994048, -42.915773, "Garagem"),
                Stop::new(-21.993740, -42.908510, "Rua Coronel Valério"),
                Stop::new(-21.990512, -42.903387, "Aterro Sanitário"),
            ],
        )
    }
}
