use itertools::Itertools;
use model::stop::Stop;

use crate::ApiError;

/// Joins the stops as `lon,lat;lon,lat;...`, the coordinate order OSRM
/// expects. Values are written as they are, without validation.
pub fn coordinates(stops: &[Stop]) -> String {
    stops
        .iter()
        .map(|stop| format!("{},{}", stop.longitude, stop.latitude))
        .join(";")
}

/// A route request for an ordered sequence of at least two stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    coordinates: String,
}

impl RouteQuery {
    pub fn new(stops: &[Stop]) -> Result<Self, ApiError> {
        if stops.len() < 2 {
            return Err(ApiError::NotEnoughCoordinates(stops.len()));
        }
        Ok(Self {
            coordinates: coordinates(stops),
        })
    }

    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    /// Full request url, asking for the complete GeoJSON geometry.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}?geometries=geojson&overview=full",
            base_url.trim_end_matches('/'),
            self.coordinates
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<Stop> {
        vec![
            Stop::new(-21.994048, -42.915773, "Garagem"),
            Stop::new(-21.99374, -42.90851, "Rua Coronel Valério"),
            Stop::new(-21.990512, -42.903387, "Aterro"),
        ]
    }

    #[test]
    fn test_coordinates_are_lon_lat() {
        assert_eq!(
            coordinates(&stops()),
            "-42.915773,-21.994048;-42.90851,-21.99374;-42.903387,-21.990512"
        );
    }

    #[test]
    fn test_every_pair_is_inverted() {
        let stops = stops();
        let query = RouteQuery::new(&stops).unwrap();

        let pairs = query
            .coordinates()
            .split(';')
            .map(|pair| {
                let (lon, lat) = pair.split_once(',').unwrap();
                (lat.parse::<f64>().unwrap(), lon.parse::<f64>().unwrap())
            })
            .collect::<Vec<_>>();

        assert_eq!(pairs, stops.iter().map(Stop::lat_lon).collect::<Vec<_>>());
    }

    #[test]
    fn test_url() {
        let stops = &stops()[..2];
        let query = RouteQuery::new(stops).unwrap();

        assert_eq!(
            query.url("http://router.project-osrm.org/route/v1/driving/"),
            "http://router.project-osrm.org/route/v1/driving/\
             -42.915773,-21.994048;-42.90851,-21.99374\
             ?geometries=geojson&overview=full"
        );
    }

    #[test]
    fn test_malformed_coordinates_pass_through() {
        let stops = vec![
            Stop::new(f64::NAN, -42.9, "a"),
            Stop::new(-21.9, -42.9, "b"),
        ];

        assert_eq!(coordinates(&stops), "-42.9,NaN;-42.9,-21.9");
    }

    #[test]
    fn test_needs_two_stops() {
        assert!(matches!(
            RouteQuery::new(&stops()[..1]),
            Err(ApiError::NotEnoughCoordinates(1))
        ));
        assert!(matches!(
            RouteQuery::new(&[]),
            Err(ApiError::NotEnoughCoordinates(0))
        ));
    }
}
