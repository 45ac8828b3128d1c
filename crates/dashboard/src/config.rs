use std::{collections::HashMap, env, fmt, net::SocketAddr, path::PathBuf, sync::Arc};

use carbon::{CarbonClient, CARBON_API_URL};
use model::route::RouteName;
use osrm::{viewer::OSRM_VIEWER_URL, OsrmClient, OSRM_ROUTE_URL};
use sheets::{
    source::{SHEET_URL_ANTA, SHEET_URL_APARECIDA, SHEET_URL_SAPUCAIA},
    SheetSource,
};
use waste_collection::{
    client::Client,
    projection::{Projector, DEFAULT_FUEL_PRICE},
};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub why: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid {} '{}': {}", self.key, self.value, self.why)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub osrm_base_url: String,
    pub osrm_viewer_url: String,
    pub carbon_api_url: String,
    /// Without a key no emission is estimated.
    pub carbon_api_key: Option<String>,
    pub sheet_urls: HashMap<RouteName, String>,
    /// Currency per liter of diesel.
    pub fuel_price: f64,
    pub bind_address: SocketAddr,
    pub static_dir: PathBuf,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Unset or blank variables
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        let fuel_price = match var("FUEL_PRICE") {
            Some(value) => parse_fuel_price(&value)?,
            None => DEFAULT_FUEL_PRICE,
        };

        let bind_address = or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);
        let bind_address =
            bind_address
                .parse::<SocketAddr>()
                .map_err(|why| ConfigError {
                    key: "BIND_ADDRESS",
                    value: bind_address.clone(),
                    why: why.to_string(),
                })?;

        Ok(Self {
            osrm_base_url: or("OSRM_BASE_URL", OSRM_ROUTE_URL),
            osrm_viewer_url: or("OSRM_VIEWER_URL", OSRM_VIEWER_URL),
            carbon_api_url: or("CARBON_API_URL", CARBON_API_URL),
            carbon_api_key: var("CARBON_API_KEY"),
            sheet_urls: HashMap::from([
                (RouteName::Sapucaia, or("SHEET_URL_SAPUCAIA", SHEET_URL_SAPUCAIA)),
                (RouteName::Anta, or("SHEET_URL_ANTA", SHEET_URL_ANTA)),
                (RouteName::Aparecida, or("SHEET_URL_APARECIDA", SHEET_URL_APARECIDA)),
            ]),
            fuel_price,
            bind_address,
            static_dir: PathBuf::from(or("STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }

    /// Wires the upstream clients into the dashboard service.
    pub fn client(&self) -> Result<Client, ConfigError> {
        let projector = Projector::new(self.fuel_price).map_err(|why| ConfigError {
            key: "FUEL_PRICE",
            value: self.fuel_price.to_string(),
            why: why.to_string(),
        })?;

        let client = Client::new(
            Arc::new(SheetSource::new(self.sheet_urls.clone())),
            Arc::new(OsrmClient::new(self.osrm_base_url.clone())),
            projector,
        );

        Ok(match &self.carbon_api_key {
            Some(key) => client.with_emissions(Arc::new(CarbonClient::new(
                self.carbon_api_url.clone(),
                key.clone(),
            ))),
            None => {
                log::warn!("CARBON_API_KEY is not set, emissions will not be estimated.");
                client
            }
        })
    }
}

fn parse_fuel_price(value: &str) -> Result<f64, ConfigError> {
    let invalid = |why: String| ConfigError {
        key: "FUEL_PRICE",
        value: value.to_owned(),
        why,
    };
    let price = value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|why| invalid(why.to_string()))?;
    Projector::new(price).map_err(|why| invalid(why.to_string()))?;
    Ok(price)
}
