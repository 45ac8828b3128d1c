use model::stop::Stop;

/// The OSRM demo front end.
pub const OSRM_VIEWER_URL: &str = "https://map.project-osrm.org/";

pub const VIEWER_ZOOM: u8 = 15;

/// Link that opens the stops as waypoints in the OSRM web viewer, centered on
/// the middle stop. `None` for an empty route.
///
/// Example: `https://map.project-osrm.org/?z=15&center=-21.994312%2C-42.910903&loc=-21.994048%2C-42.915773&loc=-21.993740%2C-42.908510&hl=en&alt=0&srv=0`
pub fn viewer_link(viewer_url: &str, stops: &[Stop]) -> Option<String> {
    let center = stops.get(stops.len() / 2)?;

    let locations = stops
        .iter()
        .map(|stop| format!("loc={}%2C{}&", stop.latitude, stop.longitude))
        .collect::<String>();

    Some(format!(
        "{}?z={}&center={}%2C{}&{}hl=en&alt=0&srv=0",
        viewer_url, VIEWER_ZOOM, center.latitude, center.longitude, locations
    ))
}
