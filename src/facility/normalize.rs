//! Conversion of raw Overpass elements into facility results.

use crate::overpass::Element;
use crate::utils::format_coordinate;

use super::types::FacilityResult;

/// Name used when the element has no `name` tag.
pub const UNKNOWN_NAME: &str = "Unknown";
/// Phone used when the element has no `phone` tag.
pub const UNKNOWN_PHONE: &str = "Not available";
/// Placeholder for a coordinate the upstream did not send.
const MISSING_COORDINATE: &str = "unknown";

/// Generate a Google Maps link that opens the given point in a browser.
pub fn generate_map_link(latitude: f64, longitude: f64) -> String {
    map_link_from_parts(&format_coordinate(latitude), &format_coordinate(longitude))
}

fn map_link_from_parts(lat: &str, lon: &str) -> String {
    format!("https://www.google.com/maps?q={lat},{lon}")
}

/// Normalize one upstream element.
pub fn normalize_element(element: &Element) -> FacilityResult {
    let render = |c: Option<f64>| {
        c.map(format_coordinate)
            .unwrap_or_else(|| MISSING_COORDINATE.to_string())
    };
    let lat = render(element.lat);
    let lon = render(element.lon);

    let map_link = match (element.lat, element.lon) {
        (Some(latitude), Some(longitude)) => generate_map_link(latitude, longitude),
        _ => map_link_from_parts(&lat, &lon),
    };

    FacilityResult {
        name: element.tag("name").unwrap_or(UNKNOWN_NAME).to_string(),
        phone: element.tag("phone").unwrap_or(UNKNOWN_PHONE).to_string(),
        location: format!("Latitude: {lat}, Longitude: {lon}"),
        map_link,
    }
}

/// Normalize all elements, keeping upstream order.
pub fn normalize_elements(elements: &[Element]) -> Vec<FacilityResult> {
    elements.iter().map(normalize_element).collect()
}
