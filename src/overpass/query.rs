//! Overpass QL query construction.

use crate::utils::format_coordinate;

/// Amenity values searched for.
pub const FACILITY_AMENITIES: [&str; 2] = ["clinic", "hospital"];

/// A nearby-facility search around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityQuery {
    /// Latitude of the search center.
    pub latitude: f64,
    /// Longitude of the search center.
    pub longitude: f64,
    /// Search radius in meters.
    pub radius: i64,
}

impl FacilityQuery {
    /// Create a new query. Values are passed through unvalidated.
    pub fn new(latitude: f64, longitude: f64, radius: i64) -> Self {
        Self {
            latitude,
            longitude,
            radius,
        }
    }

    /// Render the Overpass QL for this search.
    pub fn to_overpass_ql(&self) -> String {
        let around = format!(
            "(around:{},{},{})",
            self.radius,
            format_coordinate(self.latitude),
            format_coordinate(self.longitude)
        );

        let mut query = String::from("[out:json];\n(\n");
        for amenity in FACILITY_AMENITIES {
            query.push_str(&format!("  node[amenity={amenity}]{around};\n"));
        }
        query.push_str(");\nout body;\n");
        query
    }
}
