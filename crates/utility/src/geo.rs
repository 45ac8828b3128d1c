pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Arithmetic mean of a set of `(latitude, longitude)` points.
///
/// Returns `None` for an empty set. This is what the maps are centered on, so
/// it is a plain average and not a geodesic centroid.
pub fn mean_center<I>(points: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut count = 0usize;
    let mut latitude_sum = 0.0;
    let mut longitude_sum = 0.0;
    for (latitude, longitude) in points {
        latitude_sum += latitude;
        longitude_sum += longitude;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((latitude_sum / count as f64, longitude_sum / count as f64))
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of the great-circle distances between consecutive points, in km.
pub fn path_length_km(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0].0, pair[0].1, pair[1].0, pair[1].1))
        .sum()
}
